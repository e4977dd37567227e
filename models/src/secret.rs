use common::RedactedSecret;

use serde::Serialize;

/// OAuth client credentials handed to the transport at construction.
#[derive(Debug, Clone)]
pub struct Secret {
    pub client_id: String,
    pub client_secret: RedactedSecret,
    pub refresh_token: RedactedSecret,
}

/// JSON body of the initial token exchange.
#[derive(Debug, Serialize)]
pub struct AuthPayload<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub refresh_token: &'a str,
}

impl Secret {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<RedactedSecret>,
        refresh_token: impl Into<RedactedSecret>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Borrowing view with the secrets exposed, for the token exchange only.
    pub fn auth_payload(&self) -> AuthPayload<'_> {
        AuthPayload {
            client_id: &self.client_id,
            client_secret: self.client_secret.expose(),
            refresh_token: self.refresh_token.expose(),
        }
    }
}
