//! Token exchange and refresh against a mock token endpoint.

use crate::support::{
    ACCESS_TOKEN, CLIENT_ID, CLIENT_SECRET, DAY_SECS, REFRESH_TOKEN, config_for,
    mount_token_exchange, secret, token_body,
};

use rdstation_client::{OAuthTransport, RdStationConfig, Transport, TransportError};

use common::HttpStatusCode;

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies construction posts the credentials as JSON to `auth/token`.
///
/// **WHY THIS MATTERS**: This is the only place the refresh token is traded for an access token.
///
/// **BUG THIS CATCHES**: Wrong payload field names or a form-encoded body.
#[tokio::test]
async fn given_valid_credentials_when_connecting_then_exchange_posts_json_secret() {
    // GIVEN: A token endpoint that only accepts the exact JSON payload
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
            "refresh_token": REFRESH_TOKEN
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body(ACCESS_TOKEN, DAY_SECS, None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Connecting
    let result = OAuthTransport::connect(secret(), &config_for(&server)).await;

    // THEN: A transport is built
    assert!(result.is_ok(), "connect failed: {:?}", result.err());
}

/// **VALUE**: Verifies a non-success exchange status fails construction with that status.
///
/// **WHY THIS MATTERS**: Revoked refresh tokens surface here; the caller needs to know.
///
/// **BUG THIS CATCHES**: Decoding an error body as a token, or returning a half-built client.
#[tokio::test]
async fn given_rejected_credentials_when_connecting_then_init_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": {"error_type": "UNAUTHORIZED", "error_message": "invalid refresh token"}
        })))
        .mount(&server)
        .await;

    let err = OAuthTransport::connect(secret(), &config_for(&server))
        .await
        .err()
        .expect("connect must fail");

    assert!(matches!(err, TransportError::Init { .. }));
    assert_eq!(err.status_code(), Some(HttpStatusCode(401)));
}

/// **VALUE**: Verifies a 200 with an undecodable body fails construction.
///
/// **WHY THIS MATTERS**: A proxy answering with HTML must not produce a client with no token.
///
/// **BUG THIS CATCHES**: Lenient token decoding.
#[tokio::test]
async fn given_malformed_token_body_when_connecting_then_init_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\xef".to_vec()))
        .mount(&server)
        .await;

    let err = OAuthTransport::connect(secret(), &config_for(&server))
        .await
        .err()
        .expect("connect must fail");

    assert!(matches!(err, TransportError::Init { status_code: None, .. }));
}

/// **VALUE**: Verifies an unreachable token endpoint fails construction.
///
/// **WHY THIS MATTERS**: Offline starts must produce a typed error, not a panic.
///
/// **BUG THIS CATCHES**: Network errors escaping as a different variant.
#[tokio::test]
async fn given_unreachable_endpoint_when_connecting_then_init_error() {
    // GIVEN: A host where nothing listens
    let config = RdStationConfig::for_base_url("http://127.0.0.1:9").unwrap();

    let err = OAuthTransport::connect(secret(), &config)
        .await
        .err()
        .expect("connect must fail");

    assert!(matches!(err, TransportError::Init { .. }));
}

/// **VALUE**: Verifies an absurd token lifetime from the server does not break construction.
///
/// **WHY THIS MATTERS**: `expires_in` is untrusted input converted into a clock value.
///
/// **BUG THIS CATCHES**: An overflow panic inside connect.
#[tokio::test]
async fn given_max_token_lifetime_when_connecting_then_connects_without_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body(ACCESS_TOKEN, i64::MAX, None)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/token/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = OAuthTransport::connect(secret(), &config_for(&server))
        .await
        .unwrap();
    let url = config_for(&server).base_url.join("ping").unwrap();

    transport.request(url, Method::GET, None).await.unwrap();
}

/// **VALUE**: Verifies an expired token is refreshed once before the request goes out.
///
/// **WHY THIS MATTERS**: Access tokens last a day; long-running callers rely on this.
///
/// **BUG THIS CATCHES**: Sending the stale token, refreshing on every request, or a wrong grant.
#[tokio::test]
async fn given_expired_token_when_requesting_then_refreshes_and_uses_new_token() {
    // GIVEN: An exchange handing out an already-expired token
    let server = MockServer::start().await;
    mount_token_exchange(&server, 0).await;

    Mock::given(method("POST"))
        .and(path("/auth/token/"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .and(body_string_contains("client_id=identificador-de-um-cliente"))
        .and(body_string_contains("client_secret=shhhhh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("access-2", DAY_SECS, Some("refresh-2"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(2)
        .mount(&server)
        .await;

    let transport = OAuthTransport::connect(secret(), &config_for(&server))
        .await
        .unwrap();
    let url = config_for(&server).base_url.join("ping").unwrap();

    // WHEN: Two requests in a row
    let first = transport.request(url.clone(), Method::GET, None).await.unwrap();
    let second = transport.request(url, Method::GET, None).await.unwrap();

    // THEN: Both use the refreshed token; the refresh ran once (checked on drop)
    assert_eq!(first, b"pong");
    assert_eq!(second, b"pong");
}

/// **VALUE**: Verifies the previous refresh token is reused when the refresh response omits one.
///
/// **WHY THIS MATTERS**: Not every grant rotates the refresh token.
///
/// **BUG THIS CATCHES**: Losing the refresh token after the first refresh.
#[tokio::test]
async fn given_refresh_without_new_refresh_token_when_refreshing_again_then_reuses_previous() {
    let server = MockServer::start().await;
    mount_token_exchange(&server, 0).await;

    Mock::given(method("POST"))
        .and(path("/auth/token/"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2", 0, None)))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(2)
        .mount(&server)
        .await;

    let transport = OAuthTransport::connect(secret(), &config_for(&server))
        .await
        .unwrap();
    let url = config_for(&server).base_url.join("ping").unwrap();

    transport.request(url.clone(), Method::GET, None).await.unwrap();
    transport.request(url, Method::GET, None).await.unwrap();
}

/// **VALUE**: Verifies a rejected refresh is reported as a token refresh error with status.
///
/// **WHY THIS MATTERS**: The caller has to re-authorize the app; a generic error hides that.
///
/// **BUG THIS CATCHES**: The request going out anyway with the stale token.
#[tokio::test]
async fn given_refresh_rejected_when_requesting_then_token_refresh_error() {
    let server = MockServer::start().await;
    mount_token_exchange(&server, 0).await;

    Mock::given(method("POST"))
        .and(path("/auth/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("revoked"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let transport = OAuthTransport::connect(secret(), &config_for(&server))
        .await
        .unwrap();
    let url = config_for(&server).base_url.join("ping").unwrap();

    let err = transport.request(url, Method::GET, None).await.unwrap_err();

    assert!(matches!(err, TransportError::TokenRefresh { .. }));
    assert_eq!(err.status_code(), Some(HttpStatusCode(401)));
}

/// **VALUE**: Verifies the production config points at the RD Station token endpoints.
///
/// **WHY THIS MATTERS**: The integration tests re-root everything; this pins the real values.
///
/// **BUG THIS CATCHES**: Test-only overrides leaking into the defaults.
#[test]
fn given_production_config_then_token_urls_are_rd_station() {
    let config = RdStationConfig::production().unwrap();

    assert_eq!(config.token_exchange_url.as_str(), rdstation_client::RD_TOKEN_EXCHANGE_URL);
    assert_eq!(config.token_refresh_url.as_str(), rdstation_client::RD_TOKEN_REFRESH_URL);
}
