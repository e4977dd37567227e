//! Errors raised by the authenticated transport.
//!
//! - Status codes are stored as [`HttpStatusCode`], never parsed back from text
//! - Remote errors keep the decoded [`RdError`] so callers can match on it
//! - Every variant records an [`ErrorLocation`] through `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};
use models::RdError;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TransportError {
    /// The initial token exchange failed; no client was built.
    #[error("Transport Init Error: {message} {location}")]
    Init {
        message: String,
        status_code: Option<HttpStatusCode>,
        location: ErrorLocation,
    },

    #[error("Transport Dispatch Error: {message} {location}")]
    Dispatch {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Transport Read Error: {message} {location}")]
    Read {
        message: String,
        location: ErrorLocation,
    },

    /// A non-200 body that is not an error envelope.
    #[error("Transport Decode Error: HTTP {status_code} - {message} {location}")]
    Decode {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Remote Error: {error} {location}")]
    Remote {
        error: RdError,
        location: ErrorLocation,
    },

    #[error("Token Refresh Error: {message} {location}")]
    TokenRefresh {
        message: String,
        status_code: Option<HttpStatusCode>,
        location: ErrorLocation,
    },
}

impl TransportError {
    #[track_caller]
    pub fn init(message: impl Into<String>) -> Self {
        TransportError::Init {
            message: message.into(),
            status_code: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn init_status(status_code: HttpStatusCode, body: impl Into<String>) -> Self {
        TransportError::Init {
            message: format!("token exchange returned HTTP {status_code}: {}", body.into()),
            status_code: Some(status_code),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn read(message: impl Into<String>) -> Self {
        TransportError::Read {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(status_code: HttpStatusCode, message: impl Into<String>) -> Self {
        TransportError::Decode {
            status_code,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn remote(error: RdError) -> Self {
        TransportError::Remote {
            error,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_refresh(message: impl Into<String>, status_code: Option<HttpStatusCode>) -> Self {
        TransportError::TokenRefresh {
            message: message.into(),
            status_code,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The structured error reported by the API, if that is what this is.
    pub fn remote_error(&self) -> Option<&RdError> {
        match self {
            TransportError::Remote { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status code if the failure came with one.
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            TransportError::Remote { error, .. } => Some(error.status_code()),
            TransportError::Decode { status_code, .. } => Some(*status_code),
            TransportError::Init { status_code, .. } => *status_code,
            TransportError::TokenRefresh { status_code, .. } => *status_code,
            TransportError::Dispatch { .. } | TransportError::Read { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.remote_error().is_some_and(RdError::is_not_found)
    }

    /// Short label for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            TransportError::Init { .. } => "init",
            TransportError::Dispatch { is_timeout: true, .. } => "timeout",
            TransportError::Dispatch { is_connection: true, .. } => "connection",
            TransportError::Dispatch { .. } => "dispatch",
            TransportError::Read { .. } => "read",
            TransportError::Decode { .. } => "decode",
            TransportError::Remote { error, .. } if error.status_code().is_unauthorized() => {
                "unauthorized"
            }
            TransportError::Remote { error, .. } if error.status_code().is_client_error() => {
                "client_error"
            }
            TransportError::Remote { error, .. } if error.status_code().is_server_error() => {
                "server_error"
            }
            TransportError::Remote { .. } => "remote",
            TransportError::TokenRefresh { .. } => "token_refresh",
        }
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        TransportError::Dispatch {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
