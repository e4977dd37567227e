//! Domain models for the RD Station contacts API.
//!
//! Plain data with a handful of predicates. Nothing in this crate performs
//! I/O; the transport and the lead operations live in `rdstation-client`.
//!
//! ## Architecture
//!
//! - **common**: error locations, status codes, redacted secrets
//! - **models** (this crate): `Lead`, `Secret`, `Token`, the error envelope
//! - **rdstation-client**: authenticated transport, lead operations, tag merging

pub mod api_error;
pub mod lead;
pub mod secret;
pub mod token;

#[cfg(test)]
mod tests;

pub use api_error::{RdError, RdErrors};
pub use lead::{ACADEMY_ACTIVE, ACADEMY_CANCELLED, EMAIL_OPT_OUT, Lead};
pub use secret::{AuthPayload, Secret};
pub use token::{AccessToken, MAX_TOKEN_LIFETIME, Token};
