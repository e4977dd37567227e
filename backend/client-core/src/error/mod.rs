pub mod config;
pub mod rdstation;
pub mod transport;

pub use config::ConfigError;
pub use rdstation::RdStationError;
pub use transport::TransportError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    RdStation(#[from] RdStationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
