use crate::api_error::RdError;
use common::HttpStatusCode;

const NOT_FOUND_BODY: &str = r#"{
    "errors": {
        "error_type": "RESOURCE_NOT_FOUND",
        "error_message": "The resource could not be found"
    }
}"#;

/// **VALUE**: Verifies the envelope decodes and takes its status from the response.
///
/// **WHY THIS MATTERS**: The status is not in the body. Callers branch on it for
/// "contact does not exist".
///
/// **BUG THIS CATCHES**: Status left at its placeholder after decoding.
#[test]
fn given_not_found_body_when_decoded_then_status_and_fields_set() {
    let error = RdError::from_response(HttpStatusCode(404), NOT_FOUND_BODY.as_bytes()).unwrap();

    assert_eq!(error.status_code(), HttpStatusCode(404));
    assert!(error.is_not_found());
    assert_eq!(error.errors.error_type, "RESOURCE_NOT_FOUND");
    assert_eq!(error.errors.error_message, "The resource could not be found");
}

/// **VALUE**: Verifies the rendered message shape "status: type - message".
///
/// **WHY THIS MATTERS**: This text is what ends up in logs and CLI output.
///
/// **BUG THIS CATCHES**: A Display impl that drops the status code.
#[test]
fn given_error_when_displayed_then_includes_status_type_and_message() {
    let error = RdError::from_response(HttpStatusCode(404), NOT_FOUND_BODY.as_bytes()).unwrap();

    assert_eq!(
        error.to_string(),
        "404: RESOURCE_NOT_FOUND - The resource could not be found"
    );
}

/// **VALUE**: Verifies non-JSON bodies fail to decode while any JSON object decodes.
///
/// **WHY THIS MATTERS**: The transport maps these two outcomes to different errors.
///
/// **BUG THIS CATCHES**: Making the envelope strict (a 201 lead body would then surface as
/// a decode error instead of a remote error) or accepting garbage.
#[test]
fn given_bodies_when_decoded_then_json_objects_accepted_and_garbage_rejected() {
    assert!(RdError::from_response(HttpStatusCode(500), b"\xef").is_err());
    assert!(RdError::from_response(HttpStatusCode(500), b"").is_err());

    let lenient = RdError::from_response(HttpStatusCode(201), br#"{"uuid": "x"}"#).unwrap();
    assert_eq!(lenient.status_code(), HttpStatusCode::CREATED);
    assert!(lenient.errors.error_type.is_empty());
}

/// **VALUE**: Verifies a `null` error body still yields a remote error with the status.
///
/// **WHY THIS MATTERS**: Some gateways answer errors with a bare `null`; callers still
/// need the status to branch on.
///
/// **BUG THIS CATCHES**: Reporting a decode failure and losing the status code.
#[test]
fn given_null_body_when_decoded_then_empty_envelope_with_status() {
    let error = RdError::from_response(HttpStatusCode(404), b"null").unwrap();

    assert!(error.is_not_found());
    assert!(error.errors.error_type.is_empty());
    assert!(error.errors.error_message.is_empty());
}

/// **VALUE**: Verifies non-JSON bodies are still rejected.
///
/// **WHY THIS MATTERS**: The transport turns this into a decode error; accepting `null`
/// must not make every body acceptable.
///
/// **BUG THIS CATCHES**: Over-lenient decoding hiding HTML error pages.
#[test]
fn given_non_json_body_when_decoded_then_error() {
    assert!(RdError::from_response(HttpStatusCode(502), b"<html>bad gateway</html>").is_err());
    assert!(RdError::from_response(HttpStatusCode(400), b"").is_err());
}
