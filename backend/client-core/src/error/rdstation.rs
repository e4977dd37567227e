use crate::error::transport::TransportError;

use common::{ErrorLocation, HttpStatusCode};
use models::RdError;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Error of every lead operation.
#[derive(Debug, ThisError)]
pub enum RdStationError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Deserialization Error: {message} {location}")]
    Deserialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl RdStationError {
    #[track_caller]
    pub fn serialization(error: &serde_json::Error) -> Self {
        RdStationError::Serialization {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn deserialization(error: &serde_json::Error) -> Self {
        RdStationError::Deserialization {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn remote_error(&self) -> Option<&RdError> {
        match self {
            RdStationError::Transport(error) => error.remote_error(),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            RdStationError::Transport(error) => error.status_code(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RdStationError::Transport(error) if error.is_not_found())
    }
}

impl From<url::ParseError> for RdStationError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        RdStationError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
