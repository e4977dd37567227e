//! Authenticated transport.
//!
//! [`OAuthTransport::connect`] trades the client credentials for an access
//! token, then every [`Transport::request`] goes out with that token as a
//! bearer header. Expired tokens are refreshed with the refresh-token grant
//! before the request is sent; concurrent callers wait on the same lock so
//! only one refresh happens.
//!
//! Only `200 OK` counts as success. Any other status is decoded as the API's
//! error envelope. That includes `201 Created`, which the contacts endpoint
//! is not expected to return.

pub mod oauth;

use crate::config::RdStationConfig;
use crate::error::TransportError;

use common::{HttpStatusCode, RedactedSecret};
use models::{AccessToken, RdError, Secret};

use std::future::Future;

use log::{debug, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use tokio::sync::Mutex;
use url::Url;

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Sends one request and returns the raw body of a `200 OK` response.
pub trait Transport: Send + Sync {
    fn request(
        &self,
        url: Url,
        method: Method,
        body: Option<Vec<u8>>,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// [`Transport`] backed by `reqwest` and an OAuth2 refresh-token flow.
pub struct OAuthTransport {
    client: Client,
    secret: Secret,
    token_refresh_url: Url,
    token: Mutex<AccessToken>,
}

impl OAuthTransport {
    /// Performs the initial token exchange.
    ///
    /// # Errors
    /// [`TransportError::Init`] when the exchange cannot be sent, the status
    /// is not 2xx, or the body is not a token.
    pub async fn connect(secret: Secret, config: &RdStationConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::init(format!("failed to build HTTP client: {e}")))?;

        let token = oauth::exchange_token(&client, &config.token_exchange_url, &secret).await?;
        info!(
            "Authenticated RD Station client {} (token valid for {}s)",
            secret.client_id, token.expires_in
        );

        Ok(Self {
            client,
            secret,
            token_refresh_url: config.token_refresh_url.clone(),
            token: Mutex::new(token.to_access_token()),
        })
    }

    /// Current bearer value, refreshing first when the token has expired.
    async fn bearer(&self) -> Result<RedactedSecret, TransportError> {
        let mut token = self.token.lock().await;

        if token.is_expired() {
            info!("Access token expired, refreshing");
            let refreshed =
                oauth::refresh_token(&self.client, &self.token_refresh_url, &self.secret, &token)
                    .await?;
            *token = refreshed;
        }

        Ok(token.access_token.clone())
    }
}

impl Transport for OAuthTransport {
    async fn request(
        &self,
        url: Url,
        method: Method,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        let bearer = self.bearer().await?;

        debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .bearer_auth(bearer.expose());
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = HttpStatusCode(response.status().as_u16());

        if status != HttpStatusCode::OK {
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::decode(status, e.to_string()))?;
            let error = RdError::from_response(status, &body)
                .map_err(|e| TransportError::decode(status, e.to_string()))?;

            warn!("RD Station responded with {error}");
            return Err(TransportError::remote(error));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::read(e.to_string()))?;

        Ok(body.to_vec())
    }
}
