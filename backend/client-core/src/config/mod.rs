//! Endpoints and credentials.
//!
//! Production values are the `RD_*` constants at the crate root. Everything
//! can be re-rooted onto another host with [`RdStationConfig::for_base_url`],
//! which is how the integration tests point the client at a mock server.
//!
//! Environment variables (a `.env` file is loaded first when present):
//!
//! | Variable | Required | Meaning |
//! |---|---|---|
//! | `RDSTATION_CLIENT_ID` | yes | OAuth client id |
//! | `RDSTATION_CLIENT_SECRET` | yes | OAuth client secret |
//! | `RDSTATION_REFRESH_TOKEN` | yes | long-lived refresh token |
//! | `RDSTATION_BASE_URL` | no | API root, defaults to `https://api.rd.services/` |
//! | `RDSTATION_TIMEOUT_SECS` | no | per-request timeout, none by default |

use crate::error::ConfigError;
use crate::{RD_BASE_URL, RD_TOKEN_EXCHANGE_PATH, RD_TOKEN_REFRESH_PATH};

use common::{ErrorLocation, RedactedSecret};
use models::Secret;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

pub const ENV_CLIENT_ID: &str = "RDSTATION_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "RDSTATION_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "RDSTATION_REFRESH_TOKEN";
pub const ENV_BASE_URL: &str = "RDSTATION_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "RDSTATION_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdStationConfig {
    /// Root every resource path is joined onto. Always ends with `/`.
    pub base_url: Url,
    /// Where the JSON credential exchange is posted at construction.
    pub token_exchange_url: Url,
    /// Where refresh-token grants are posted once the access token expires.
    pub token_refresh_url: Url,
    pub request_timeout: Option<Duration>,
}

impl RdStationConfig {
    /// The production API.
    #[track_caller]
    pub fn production() -> Result<Self, ConfigError> {
        Self::for_base_url(RD_BASE_URL)
    }

    /// All endpoints rooted at `base_url`. A missing trailing slash is added.
    #[track_caller]
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        let token_exchange_url = join(&base_url, RD_TOKEN_EXCHANGE_PATH)?;
        let token_refresh_url = join(&base_url, RD_TOKEN_REFRESH_PATH)?;

        Ok(Self {
            base_url,
            token_exchange_url,
            token_refresh_url,
            request_timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Reads the optional endpoint and timeout overrides from the environment.
    #[track_caller]
    pub fn from_env() -> Result<Self, ConfigError> {
        try_load_dotenv();

        let mut config = match optional_var(ENV_BASE_URL)? {
            Some(base_url) => {
                info!("Using RD Station base URL override: {base_url}");
                Self::for_base_url(&base_url)?
            }
            None => Self::production()?,
        };

        if let Some(raw) = optional_var(ENV_TIMEOUT_SECS)? {
            let secs: u64 = raw.parse().map_err(|e| ConfigError::InvalidValue {
                location: ErrorLocation::from(Location::caller()),
                name: ENV_TIMEOUT_SECS,
                reason: format!("{raw:?} is not a number of seconds: {e}"),
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

/// Builds the client credentials from the environment.
#[track_caller]
pub fn load_secret_from_env() -> Result<Secret, ConfigError> {
    try_load_dotenv();

    let client_id = required_var(ENV_CLIENT_ID)?;
    let client_secret = required_var(ENV_CLIENT_SECRET)?;
    let refresh_token = required_var(ENV_REFRESH_TOKEN)?;

    debug!(
        "Loaded RD Station credentials for client {client_id} (secret {} chars, refresh token {} chars)",
        client_secret.len(),
        refresh_token.len()
    );

    Ok(Secret {
        client_id,
        client_secret: RedactedSecret::new(client_secret),
        refresh_token: RedactedSecret::new(refresh_token),
    })
}

/// Loads an explicit env file, overriding nothing already set in the process.
#[track_caller]
pub fn load_env_file(path: &Path) -> Result<PathBuf, ConfigError> {
    dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
        location: ErrorLocation::from(Location::caller()),
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!("Loaded env file: {}", path.display());
    Ok(path.to_path_buf())
}

/// `.env` from the working directory, if there is one.
fn try_load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded .env from: {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found - using process environment"),
        Err(e) => warn!("Failed to parse .env: {e}"),
    }
}

#[track_caller]
fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name)?.ok_or(ConfigError::MissingVar {
        location: ErrorLocation::from(Location::caller()),
        name,
    })
}

/// Blank values count as unset.
#[track_caller]
fn optional_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            location: ErrorLocation::from(Location::caller()),
            name,
            reason: String::from("contains invalid unicode"),
        }),
    }
}

#[track_caller]
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized).map_err(|e| ConfigError::InvalidUrl {
        location: ErrorLocation::from(Location::caller()),
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            location: ErrorLocation::from(Location::caller()),
            url: raw.to_string(),
            reason: String::from("URL cannot be used as a base"),
        });
    }

    Ok(url)
}

#[track_caller]
fn join(base_url: &Url, path: &str) -> Result<Url, ConfigError> {
    base_url.join(path).map_err(|e| ConfigError::InvalidUrl {
        location: ErrorLocation::from(Location::caller()),
        url: format!("{base_url}{path}"),
        reason: e.to_string(),
    })
}
