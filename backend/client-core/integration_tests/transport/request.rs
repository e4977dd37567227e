//! Authenticated requests and response classification.

use crate::support::{ACCESS_TOKEN, config_for, connected_transport, not_found_body};

use rdstation_client::{Transport, TransportError};

use common::HttpStatusCode;

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies every request carries the bearer token and JSON headers.
///
/// **WHY THIS MATTERS**: The API rejects requests without them.
///
/// **BUG THIS CATCHES**: Headers only set on some methods, or a missing `Bearer` prefix.
#[tokio::test]
async fn given_connected_transport_when_requesting_then_sends_bearer_and_json_headers() {
    // GIVEN: An endpoint that only matches fully-headed requests
    let server = MockServer::start().await;
    let transport = connected_transport(&server).await;

    Mock::given(method("GET"))
        .and(path("/test/success"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("test"))
        .expect(1)
        .mount(&server)
        .await;

    let url = config_for(&server).base_url.join("test/success").unwrap();

    // WHEN: Requesting
    let body = transport.request(url, Method::GET, None).await.unwrap();

    // THEN: The raw body comes back untouched
    assert_eq!(body, b"test");
}

/// **VALUE**: Verifies the request body is forwarded byte for byte.
///
/// **WHY THIS MATTERS**: Lead updates are PATCH bodies; a dropped body is a silent no-op.
///
/// **BUG THIS CATCHES**: Body only attached for POST.
#[tokio::test]
async fn given_patch_body_when_requesting_then_body_is_forwarded() {
    let server = MockServer::start().await;
    let transport = connected_transport(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/test/patch"))
        .and(body_json(json!({"tags": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let url = config_for(&server).base_url.join("test/patch").unwrap();
    let payload = serde_json::to_vec(&json!({"tags": ["a", "b"]})).unwrap();

    let body = transport
        .request(url, Method::PATCH, Some(payload))
        .await
        .unwrap();

    assert!(body.is_empty());
}

/// **VALUE**: Verifies a 404 error envelope becomes a remote error carrying status and fields.
///
/// **WHY THIS MATTERS**: Callers branch on "lead does not exist".
///
/// **BUG THIS CATCHES**: Losing the status code or the decoded error type.
#[tokio::test]
async fn given_not_found_envelope_when_requesting_then_remote_error_with_404() {
    let server = MockServer::start().await;
    let transport = connected_transport(&server).await;

    Mock::given(method("GET"))
        .and(path("/test/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&server)
        .await;

    let url = config_for(&server).base_url.join("test/missing").unwrap();

    let err = transport.request(url, Method::GET, None).await.unwrap_err();

    assert!(err.is_not_found());
    let remote = err.remote_error().expect("remote error");
    assert_eq!(remote.errors.status_code, HttpStatusCode::NOT_FOUND);
    assert_eq!(remote.errors.error_type, "RESOURCE_NOT_FOUND");
    assert_eq!(remote.errors.error_message, "The resource could not be found");
}

/// **VALUE**: Verifies an error status with an empty body is a decode error.
///
/// **WHY THIS MATTERS**: An empty body is not valid JSON, so there is no envelope to report.
///
/// **BUG THIS CATCHES**: Reporting a remote error with blank fields instead.
#[tokio::test]
async fn given_error_status_with_empty_body_when_requesting_then_decode_error() {
    let server = MockServer::start().await;
    let transport = connected_transport(&server).await;

    Mock::given(method("GET"))
        .and(path("/test/empty"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let url = config_for(&server).base_url.join("test/empty").unwrap();

    let err = transport.request(url, Method::GET, None).await.unwrap_err();

    assert!(matches!(err, TransportError::Decode { .. }));
    assert_eq!(err.status_code(), Some(HttpStatusCode(400)));
}

/// **VALUE**: Verifies a non-200 success code with garbage is a decode error.
///
/// **WHY THIS MATTERS**: Only `200 OK` counts as success.
///
/// **BUG THIS CATCHES**: Treating any 2xx as success.
#[tokio::test]
async fn given_created_with_invalid_body_when_requesting_then_decode_error() {
    let server = MockServer::start().await;
    let transport = connected_transport(&server).await;

    Mock::given(method("GET"))
        .and(path("/test/undecodable"))
        .respond_with(ResponseTemplate::new(201).set_body_bytes(b"\xef".to_vec()))
        .mount(&server)
        .await;

    let url = config_for(&server).base_url.join("test/undecodable").unwrap();

    let err = transport.request(url, Method::GET, None).await.unwrap_err();

    assert!(matches!(err, TransportError::Decode { .. }));
    assert_eq!(err.status_code(), Some(HttpStatusCode::CREATED));
}

/// **VALUE**: Verifies a 201 with a JSON object is decoded leniently into a remote error.
///
/// **WHY THIS MATTERS**: The envelope decode tolerates unknown fields, so a lead body
/// becomes an error with empty type and message but the real status.
///
/// **BUG THIS CATCHES**: Silently returning the body of a non-200 response.
#[tokio::test]
async fn given_created_with_json_body_when_requesting_then_remote_error_with_201() {
    let server = MockServer::start().await;
    let transport = connected_transport(&server).await;

    Mock::given(method("POST"))
        .and(path("/test/created"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "abc"})))
        .mount(&server)
        .await;

    let url = config_for(&server).base_url.join("test/created").unwrap();

    let err = transport
        .request(url, Method::POST, Some(b"{}".to_vec()))
        .await
        .unwrap_err();

    let remote = err.remote_error().expect("remote error");
    assert_eq!(remote.errors.status_code, HttpStatusCode::CREATED);
    assert!(remote.errors.error_type.is_empty());
    assert!(remote.errors.error_message.is_empty());
}

/// **VALUE**: Verifies a `null` error body is reported as a remote error with its status.
///
/// **WHY THIS MATTERS**: `null` is valid JSON for the envelope; the status is what callers need.
///
/// **BUG THIS CATCHES**: Classifying it as undecodable and dropping the status.
#[tokio::test]
async fn given_error_status_with_null_body_when_requesting_then_remote_error() {
    let server = MockServer::start().await;
    let transport = connected_transport(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/test/null"))
        .respond_with(ResponseTemplate::new(404).set_body_string("null"))
        .mount(&server)
        .await;

    let url = config_for(&server).base_url.join("test/null").unwrap();

    let err = transport.request(url, Method::DELETE, None).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, TransportError::Remote { .. }));
}
