use crate::token::{MAX_TOKEN_LIFETIME, Token};
use std::time::{Duration, SystemTime};

fn token(expires_in: i64, refresh_token: &str) -> Token {
    serde_json::from_value(serde_json::json!({
        "access_token": "access",
        "expires_in": expires_in,
        "refresh_token": refresh_token,
        "creation_date": "2026-01-01T00:00:00Z"
    }))
    .unwrap()
}

/// **VALUE**: Verifies the absolute expiry is "now + expires_in".
///
/// **WHY THIS MATTERS**: The transport refreshes based on this instant. A wrong unit
/// (millis vs seconds) either refreshes on every call or never.
///
/// **BUG THIS CATCHES**: Unit or sign errors in the conversion.
#[test]
fn given_token_when_converted_then_expiry_is_now_plus_offset() {
    // GIVEN: A day-long token
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    let token = token(86_400, "refresh");

    // WHEN: Converting at a fixed instant
    let access = token.to_access_token_at(now);

    // THEN: Expiry is exactly one day later and the values carry over
    assert_eq!(access.expiry, now + Duration::from_secs(86_400));
    assert_eq!(access.access_token.expose(), "access");
    assert_eq!(
        access.refresh_token.as_ref().map(|r| r.expose()),
        Some("refresh")
    );
}

/// **VALUE**: Verifies expiry checks honour the skew window.
///
/// **WHY THIS MATTERS**: A token that expires while the request is in flight gets a 401.
///
/// **BUG THIS CATCHES**: Comparing against the raw expiry without skew.
#[test]
fn given_access_token_when_near_expiry_then_reported_expired() {
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    let access = token(60, "").to_access_token_at(now);

    assert!(!access.is_expired_at(now));
    assert!(!access.is_expired_at(now + Duration::from_secs(49)));
    assert!(access.is_expired_at(now + Duration::from_secs(50)));
    assert!(access.is_expired_at(now + Duration::from_secs(61)));
}

/// **VALUE**: Verifies an empty refresh token becomes `None` and negative lifetimes are already expired.
///
/// **WHY THIS MATTERS**: Refresh must keep the previous refresh token when the server omits
/// one, and odd server clocks must not panic on `SystemTime` arithmetic.
///
/// **BUG THIS CATCHES**: Storing an empty refresh token, or an underflow panic.
#[test]
fn given_edge_token_values_when_converted_then_handled() {
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(100);

    let access = token(-30, "").to_access_token_at(now);

    assert!(access.refresh_token.is_none());
    assert!(access.is_expired_at(now));
}

/// **VALUE**: Verifies a huge `expires_in` is clamped instead of overflowing the clock.
///
/// **WHY THIS MATTERS**: The value comes straight from the token endpoint; the conversion
/// runs inside connect and refresh and must never panic.
///
/// **BUG THIS CATCHES**: Unchecked `SystemTime + Duration` panicking on overflow.
#[test]
fn given_max_expires_in_when_converted_then_expiry_clamped() {
    // GIVEN: A token decoded with the largest lifetime JSON can carry
    let token: Token = serde_json::from_str(
        r#"{"access_token":"a","expires_in":9223372036854775807,"refresh_token":"r"}"#,
    )
    .unwrap();

    // WHEN: Converting against the real clock and a fixed one
    let live = token.to_access_token();
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    let fixed = token.to_access_token_at(now);

    // THEN: No panic, expiry sits at the cap and the token is usable
    assert!(!live.is_expired());
    assert_eq!(fixed.expiry, now + MAX_TOKEN_LIFETIME);
    assert!(!fixed.is_expired_at(now));
}

/// **VALUE**: Verifies token Debug output hides both tokens.
///
/// **WHY THIS MATTERS**: The transport logs around token exchange.
///
/// **BUG THIS CATCHES**: A derived Debug leaking credentials.
#[test]
fn given_token_when_debug_formatted_then_tokens_hidden() {
    let rendered = format!("{:?}", token(10, "refresh-value"));

    assert!(!rendered.contains("refresh-value"));
    assert!(!rendered.contains("\"access\""));
    assert!(rendered.contains("expires_in: 10"));
}
