use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Missing Variable Error: {name} is not set {location}")]
    MissingVar {
        location: ErrorLocation,
        name: &'static str,
    },

    #[error("Config Invalid Value Error: {name}: {reason} {location}")]
    InvalidValue {
        location: ErrorLocation,
        name: &'static str,
        reason: String,
    },

    #[error("Config Invalid URL Error: {url}: {reason} {location}")]
    InvalidUrl {
        location: ErrorLocation,
        url: String,
        reason: String,
    },

    #[error("Config Env File Error: {path}: {reason} {location}")]
    EnvFile {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },
}
