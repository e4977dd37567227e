// Unit tests for TransportError helpers

use crate::error::{RdStationError, TransportError};

use common::HttpStatusCode;
use models::RdError;

fn remote(status: u16) -> TransportError {
    let body = br#"{"errors":{"error_type":"BAD","error_message":"bad request"}}"#;
    TransportError::remote(RdError::from_response(HttpStatusCode(status), body).unwrap())
}

/// **VALUE**: Verifies status codes are exposed for every variant that has one.
///
/// **WHY THIS MATTERS**: Callers branch on status without matching every variant.
///
/// **BUG THIS CATCHES**: A variant returning `None` despite carrying a status.
#[test]
fn given_errors_with_status_when_queried_then_status_returned() {
    assert_eq!(remote(422).status_code(), Some(HttpStatusCode(422)));
    assert_eq!(
        TransportError::decode(HttpStatusCode(502), "eof").status_code(),
        Some(HttpStatusCode(502))
    );
    assert_eq!(
        TransportError::init_status(HttpStatusCode(401), "denied").status_code(),
        Some(HttpStatusCode(401))
    );
    assert_eq!(TransportError::init("offline").status_code(), None);
    assert_eq!(TransportError::read("reset").status_code(), None);
}

/// **VALUE**: Verifies categories distinguish client and server side remote failures.
///
/// **WHY THIS MATTERS**: The CLI logs the category next to the error.
///
/// **BUG THIS CATCHES**: Guard ordering sending every remote error to one bucket.
#[test]
fn given_remote_errors_when_categorized_then_split_by_status_class() {
    assert_eq!(remote(401).error_category(), "unauthorized");
    assert_eq!(remote(404).error_category(), "client_error");
    assert_eq!(remote(503).error_category(), "server_error");
    assert_eq!(remote(201).error_category(), "remote");
    assert_eq!(
        TransportError::token_refresh("expired", None).error_category(),
        "token_refresh"
    );
}

/// **VALUE**: Verifies the message carries the remote text and the capture location.
///
/// **WHY THIS MATTERS**: Logs must show both what the API said and where we noticed.
///
/// **BUG THIS CATCHES**: A Display format dropping the location or the envelope.
#[test]
fn given_remote_error_when_displayed_then_includes_envelope_and_location() {
    let rendered = remote(400).to_string();

    assert!(rendered.starts_with("Remote Error: 400: BAD - bad request"));
    assert!(rendered.contains("transport_error.rs"));
}

/// **VALUE**: Verifies `RdStationError` delegates the helpers to the wrapped transport error.
///
/// **WHY THIS MATTERS**: Lead operations return `RdStationError`, not `TransportError`.
///
/// **BUG THIS CATCHES**: Delegation missing for the transparent variant.
#[test]
fn given_wrapped_transport_error_when_queried_then_delegates() {
    let err = RdStationError::from(remote(404));

    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(HttpStatusCode(404)));
    assert_eq!(err.remote_error().unwrap().errors.error_message, "bad request");
    assert!(err.to_string().starts_with("Remote Error: 404: BAD"));
}
