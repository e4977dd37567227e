//! Typed client for the RD Station Marketing contacts API.
//!
//! - [`transport`]: token exchange, bearer injection, refresh, error decoding
//! - [`rdstation_client`]: lead CRUD and tag mutation on top of a [`Transport`]
//! - [`tags`]: in-memory tag reconciliation used by the tag operations
//! - [`config`]: endpoints and credentials, from code or the environment

pub mod config;
pub mod error;
pub mod rdstation_client;
pub mod tags;
pub mod transport;

#[cfg(test)]
mod tests;

pub use config::RdStationConfig;
pub use error::{ConfigError, CoreError, RdStationError, TransportError};
pub use rdstation_client::RdStationClient;
pub use transport::{OAuthTransport, Transport};

pub use models::{
    ACADEMY_ACTIVE, ACADEMY_CANCELLED, AccessToken, EMAIL_OPT_OUT, Lead, RdError, RdErrors,
    Secret, Token,
};

pub const RD_BASE_URL: &str = "https://api.rd.services/";
pub const RD_LEAD_PATH: &str = "platform/contacts/";
pub const RD_TOKEN_EXCHANGE_PATH: &str = "auth/token";
pub const RD_TOKEN_REFRESH_PATH: &str = "auth/token/";
pub const RD_TOKEN_EXCHANGE_URL: &str = const_format::concatcp!(RD_BASE_URL, RD_TOKEN_EXCHANGE_PATH);
pub const RD_TOKEN_REFRESH_URL: &str = const_format::concatcp!(RD_BASE_URL, RD_TOKEN_REFRESH_PATH);
