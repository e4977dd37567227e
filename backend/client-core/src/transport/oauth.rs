//! Token endpoint calls: the initial JSON exchange and the refresh-token grant.

use crate::error::TransportError;
use crate::transport::APPLICATION_JSON;

use common::HttpStatusCode;
use models::{AccessToken, Secret, Token};

use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;
use url::form_urlencoded;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

/// POSTs `{client_id, client_secret, refresh_token}` and decodes the token.
pub async fn exchange_token(
    client: &Client,
    token_exchange_url: &Url,
    secret: &Secret,
) -> Result<Token, TransportError> {
    let payload = serde_json::to_vec(&secret.auth_payload())
        .map_err(|e| TransportError::init(format!("failed to encode credentials: {e}")))?;

    debug!("POST {token_exchange_url} (token exchange)");

    let response = client
        .post(token_exchange_url.clone())
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .header(ACCEPT, APPLICATION_JSON)
        .body(payload)
        .send()
        .await
        .map_err(|e| TransportError::init(format!("token exchange request failed: {e}")))?;

    let status = HttpStatusCode(response.status().as_u16());
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::init(format!("failed to read token response: {e}")))?;

    if !status.is_success() {
        return Err(TransportError::init_status(
            status,
            String::from_utf8_lossy(&body),
        ));
    }

    serde_json::from_slice(&body)
        .map_err(|e| TransportError::init(format!("invalid token response: {e}")))
}

/// Runs the refresh-token grant with the credentials sent as form params.
///
/// Uses the refresh token from `current` when it has one, otherwise the one
/// the client was constructed with. If the response omits a refresh token
/// the previous one is kept.
pub async fn refresh_token(
    client: &Client,
    token_refresh_url: &Url,
    secret: &Secret,
    current: &AccessToken,
) -> Result<AccessToken, TransportError> {
    let refresh_token = current
        .refresh_token
        .as_ref()
        .unwrap_or(&secret.refresh_token)
        .clone();

    let form = form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", GRANT_TYPE_REFRESH_TOKEN)
        .append_pair("refresh_token", refresh_token.expose())
        .append_pair("client_id", &secret.client_id)
        .append_pair("client_secret", secret.client_secret.expose())
        .finish();

    debug!("POST {token_refresh_url} (refresh token grant)");

    let response = client
        .post(token_refresh_url.clone())
        .header(CONTENT_TYPE, FORM_URLENCODED)
        .header(ACCEPT, APPLICATION_JSON)
        .body(form)
        .send()
        .await
        .map_err(|e| TransportError::token_refresh(format!("refresh request failed: {e}"), None))?;

    let status = HttpStatusCode(response.status().as_u16());
    let body = response.bytes().await.map_err(|e| {
        TransportError::token_refresh(format!("failed to read refresh response: {e}"), Some(status))
    })?;

    if !status.is_success() {
        return Err(TransportError::token_refresh(
            format!("refresh returned HTTP {status}: {}", String::from_utf8_lossy(&body)),
            Some(status),
        ));
    }

    let token: Token = serde_json::from_slice(&body).map_err(|e| {
        TransportError::token_refresh(format!("invalid refresh response: {e}"), Some(status))
    })?;

    let mut refreshed = token.to_access_token();
    if refreshed.refresh_token.is_none() {
        refreshed.refresh_token = Some(refresh_token);
    }

    Ok(refreshed)
}
