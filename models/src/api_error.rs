//! Error envelope returned by the API on non-200 responses.
//!
//! Wire shape: `{"errors": {"error_type": "...", "error_message": "..."}}`.
//! The status code is not part of the body; the transport fills it in from
//! the response after decoding. Decoding is lenient: any JSON object or
//! `null` decodes, missing members become empty strings.

use common::HttpStatusCode;

use serde::Deserialize;
use thiserror::Error as ThisError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ThisError)]
#[error("{errors}")]
pub struct RdError {
    #[serde(default)]
    pub errors: RdErrors,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ThisError)]
#[error("{status_code}: {error_type} - {error_message}")]
pub struct RdErrors {
    #[serde(skip, default = "unknown_status")]
    pub status_code: HttpStatusCode,
    #[serde(default)]
    pub error_type: String,
    #[serde(default)]
    pub error_message: String,
}

fn unknown_status() -> HttpStatusCode {
    HttpStatusCode(0)
}

impl Default for RdErrors {
    fn default() -> Self {
        Self {
            status_code: unknown_status(),
            error_type: String::new(),
            error_message: String::new(),
        }
    }
}

impl RdError {
    /// Decodes an error body and stamps it with the response status.
    ///
    /// A JSON `null` body decodes to an envelope with empty type and message.
    pub fn from_response(
        status_code: HttpStatusCode,
        body: &[u8],
    ) -> Result<Self, serde_json::Error> {
        let decoded: Option<RdError> = serde_json::from_slice(body)?;
        let mut error = decoded.unwrap_or_default();
        error.errors.status_code = status_code;
        Ok(error)
    }

    pub fn status_code(&self) -> HttpStatusCode {
        self.errors.status_code
    }

    pub fn is_not_found(&self) -> bool {
        self.errors.status_code.is_not_found()
    }
}
