// Unit tests for configuration
// Environment-mutating tests are serialized with serial_test

use crate::config::{
    ENV_BASE_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_REFRESH_TOKEN, ENV_TIMEOUT_SECS,
    RdStationConfig, load_env_file, load_secret_from_env,
};
use crate::error::ConfigError;

use std::io::Write;
use std::time::Duration;

use serial_test::serial;

fn clear_env() {
    for name in [
        ENV_CLIENT_ID,
        ENV_CLIENT_SECRET,
        ENV_REFRESH_TOKEN,
        ENV_BASE_URL,
        ENV_TIMEOUT_SECS,
    ] {
        // SAFETY: tests touching the environment are #[serial]
        unsafe { std::env::remove_var(name) };
    }
}

fn set_env(name: &str, value: &str) {
    // SAFETY: tests touching the environment are #[serial]
    unsafe { std::env::set_var(name, value) };
}

/// **VALUE**: Verifies the production endpoints.
///
/// **WHY THIS MATTERS**: The exchange URL has no trailing slash and the refresh URL has
/// one; both are what the API expects.
///
/// **BUG THIS CATCHES**: A typo in the constants or a join dropping a segment.
#[test]
fn given_production_config_when_built_then_uses_rd_station_urls() {
    let config = RdStationConfig::production().unwrap();

    assert_eq!(config.base_url.as_str(), "https://api.rd.services/");
    assert_eq!(
        config.token_exchange_url.as_str(),
        "https://api.rd.services/auth/token"
    );
    assert_eq!(
        config.token_refresh_url.as_str(),
        "https://api.rd.services/auth/token/"
    );
    assert_eq!(config.request_timeout, None);
}

/// **VALUE**: Verifies a base URL without trailing slash is normalized before joining.
///
/// **WHY THIS MATTERS**: `Url::join` replaces the last segment when the base lacks a slash,
/// which would silently drop a path prefix such as `/sandbox`.
///
/// **BUG THIS CATCHES**: Missing normalization.
#[test]
fn given_base_url_without_slash_when_built_then_path_prefix_kept() {
    let config = RdStationConfig::for_base_url("http://127.0.0.1:8080/sandbox").unwrap();

    assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/sandbox/");
    assert_eq!(
        config.token_exchange_url.as_str(),
        "http://127.0.0.1:8080/sandbox/auth/token"
    );
}

/// **VALUE**: Verifies invalid base URLs are rejected with the offending value.
///
/// **WHY THIS MATTERS**: A bad override should fail at startup, not on the first request.
///
/// **BUG THIS CATCHES**: Accepting relative or cannot-be-a-base URLs.
#[test]
fn given_invalid_base_url_when_built_then_invalid_url_error() {
    let err = RdStationConfig::for_base_url("not a url").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { ref url, .. } if url == "not a url"));

    let err = RdStationConfig::for_base_url("mailto:someone@example.org").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
}

/// **VALUE**: Verifies credentials are read from the environment.
///
/// **WHY THIS MATTERS**: This is how the CLI gets its credentials.
///
/// **BUG THIS CATCHES**: Swapped variable names.
#[test]
#[serial]
fn given_credentials_in_env_when_loaded_then_secret_built() {
    clear_env();
    set_env(ENV_CLIENT_ID, "client");
    set_env(ENV_CLIENT_SECRET, "shhhhh");
    set_env(ENV_REFRESH_TOKEN, " refresh ");

    let secret = load_secret_from_env().unwrap();

    assert_eq!(secret.client_id, "client");
    assert_eq!(secret.client_secret.expose(), "shhhhh");
    assert_eq!(secret.refresh_token.expose(), "refresh");
    clear_env();
}

/// **VALUE**: Verifies a missing or blank credential names the variable.
///
/// **WHY THIS MATTERS**: "which variable is missing" is the first question on a failed start.
///
/// **BUG THIS CATCHES**: Treating blank values as present.
#[test]
#[serial]
fn given_blank_credential_when_loaded_then_missing_var_error() {
    clear_env();
    set_env(ENV_CLIENT_ID, "client");
    set_env(ENV_CLIENT_SECRET, "   ");
    set_env(ENV_REFRESH_TOKEN, "refresh");

    let err = load_secret_from_env().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingVar { name, .. } if name == ENV_CLIENT_SECRET
    ));
    clear_env();
}

/// **VALUE**: Verifies the optional base URL and timeout overrides.
///
/// **WHY THIS MATTERS**: Sandboxes and slow networks are configured this way.
///
/// **BUG THIS CATCHES**: Ignoring the overrides or accepting a non-numeric timeout.
#[test]
#[serial]
fn given_overrides_in_env_when_config_loaded_then_applied() {
    clear_env();
    set_env(ENV_BASE_URL, "http://localhost:9000");
    set_env(ENV_TIMEOUT_SECS, "15");

    let config = RdStationConfig::from_env().unwrap();

    assert_eq!(config.base_url.as_str(), "http://localhost:9000/");
    assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

    set_env(ENV_TIMEOUT_SECS, "soon");
    let err = RdStationConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { name, .. } if name == ENV_TIMEOUT_SECS
    ));
    clear_env();
}

/// **VALUE**: Verifies an explicit env file feeds the credential loader.
///
/// **WHY THIS MATTERS**: The CLI accepts `--env-file` for per-account credentials.
///
/// **BUG THIS CATCHES**: The file being parsed but not applied, or a missing file not erroring.
#[test]
#[serial]
fn given_env_file_when_loaded_then_credentials_available() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{ENV_CLIENT_ID}=from-file").unwrap();
    writeln!(file, "{ENV_CLIENT_SECRET}=secret-from-file").unwrap();
    writeln!(file, "{ENV_REFRESH_TOKEN}=refresh-from-file").unwrap();

    load_env_file(file.path()).unwrap();
    let secret = load_secret_from_env().unwrap();
    assert_eq!(secret.client_id, "from-file");

    let missing = file.path().with_extension("missing");
    assert!(matches!(
        load_env_file(&missing),
        Err(ConfigError::EnvFile { .. })
    ));
    clear_env();
}
