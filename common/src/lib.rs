//! Shared building blocks for the RD Station client workspace.
//!
//! Nothing in here knows about leads or tags. The crate carries the pieces
//! every other member needs when it reports an error or handles a credential:
//!
//! - [`ErrorLocation`]: file/line/column captured through `#[track_caller]`
//! - [`HttpStatusCode`]: status predicates without a dependency on an HTTP crate
//! - [`RedactedSecret`]: credential strings that never reach logs or JSON

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
