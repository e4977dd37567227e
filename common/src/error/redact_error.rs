use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when something tries to push a [`crate::RedactedSecret`] through serde.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
