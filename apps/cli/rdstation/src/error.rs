use rdstation_client::{ConfigError, RdStationError, TransportError};

use common::ErrorLocation;

use std::process::ExitCode;

use thiserror::Error;

/// Everything that can end a CLI run early.
///
/// Library errors are wrapped as-is so their own location and remote
/// details reach the terminal unchanged.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error raised by the CLI itself (logger, output)
    #[error("CLI Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Construction failed, so no command ran.
    #[error(transparent)]
    Connect(#[from] TransportError),

    #[error(transparent)]
    Command(#[from] RdStationError),
}

/// Exit status for a missing lead, so scripts can tell it apart from failures.
pub const EXIT_NOT_FOUND: u8 = 2;

pub const EXIT_FAILURE: u8 = 1;

impl CliError {
    #[track_caller]
    pub fn cli(message: impl Into<String>) -> Self {
        CliError::Cli {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    pub fn exit_status(&self) -> u8 {
        match self {
            CliError::Command(e) if e.is_not_found() => EXIT_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }

    /// Short label printed next to the error.
    pub fn category(&self) -> &'static str {
        match self {
            CliError::Cli { .. } => "cli",
            CliError::Config(_) => "config",
            CliError::Connect(e) | CliError::Command(RdStationError::Transport(e)) => {
                e.error_category()
            }
            CliError::Command(_) => "encoding",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}
