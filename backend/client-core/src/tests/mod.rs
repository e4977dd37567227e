mod config;
mod transport_error;
