//! Error locations point at the caller that raised the error.

use rdstation_client::{ConfigError, RdStationConfig, TransportError};

use common::HttpStatusCode;

/// **VALUE**: Verifies constructor-raised errors record this file as their location.
///
/// **WHY THIS MATTERS**: Locations are how a log line gets traced back to code.
///
/// **BUG THIS CATCHES**: A missing `#[track_caller]` reporting the constructor's own file.
#[test]
fn given_decode_error_built_here_when_displayed_then_location_is_this_file() {
    let err = TransportError::decode(HttpStatusCode(502), "bad gateway");

    let rendered = err.to_string();

    assert!(rendered.starts_with("Transport Decode Error: HTTP 502"));
    assert!(rendered.contains("integration_tests/error/transport.rs"), "{rendered}");
}

/// **VALUE**: Verifies config validation errors record the caller's location.
///
/// **WHY THIS MATTERS**: Bad base URLs usually come from user config; the log should
/// point at the code that read it.
///
/// **BUG THIS CATCHES**: Location captured inside the config module instead.
#[test]
fn given_invalid_base_url_when_configuring_then_error_points_at_caller() {
    let err = RdStationConfig::for_base_url("not a url").unwrap_err();

    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    assert!(err.to_string().contains("integration_tests/error/transport.rs"), "{err}");
}
