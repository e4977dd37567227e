use crate::config::RdStationConfig;
use crate::error::{CoreError, RdStationError, TransportError};
use crate::tags::{TagsPatch, merge_added_tags, strip_removed_tags};
use crate::transport::{OAuthTransport, Transport};
use crate::RD_LEAD_PATH;

use common::RedactedSecret;
use models::{Lead, Secret};

use log::debug;
use reqwest::Method;
use serde::Serialize;
use url::Url;

/// Lead operations against `platform/contacts`.
///
/// Generic over the [`Transport`] so the HTTP side can be swapped out; the
/// default is the OAuth-authenticated `reqwest` transport.
pub struct RdStationClient<T = OAuthTransport> {
    transport: T,
    base_url: Url,
}

impl RdStationClient<OAuthTransport> {
    /// Connects to the production API.
    pub async fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<RedactedSecret>,
        refresh_token: impl Into<RedactedSecret>,
    ) -> Result<Self, CoreError> {
        let secret = Secret::new(client_id, client_secret, refresh_token);
        let config = RdStationConfig::production()?;
        Ok(Self::connect(secret, &config).await?)
    }

    /// Exchanges `secret` for a token at the configured endpoints.
    pub async fn connect(secret: Secret, config: &RdStationConfig) -> Result<Self, TransportError> {
        let transport = OAuthTransport::connect(secret, config).await?;
        Ok(Self::with_transport(transport, config.base_url.clone()))
    }
}

impl<T: Transport> RdStationClient<T> {
    /// `base_url` must end with `/`; [`RdStationConfig`] guarantees that.
    pub fn with_transport(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_lead_by_email(&self, email: &str) -> Result<Lead, RdStationError> {
        let url = self.lead_url_by_email(email)?;
        let body = self.transport.request(url, Method::GET, None).await?;

        serde_json::from_slice(&body).map_err(|e| RdStationError::deserialization(&e))
    }

    /// Returns the lead as echoed back by the API, which assigns `uuid`.
    pub async fn create_lead(&self, lead: &Lead) -> Result<Lead, RdStationError> {
        let url = self.base_url.join(RD_LEAD_PATH)?;
        let payload = encode(lead)?;
        let body = self.transport.request(url, Method::POST, Some(payload)).await?;

        serde_json::from_slice(&body).map_err(|e| RdStationError::deserialization(&e))
    }

    pub async fn delete_lead_by_email(&self, email: &str) -> Result<(), RdStationError> {
        let url = self.lead_url_by_email(email)?;
        self.transport.request(url, Method::DELETE, None).await?;
        Ok(())
    }

    /// PATCHes the populated fields of `lead`, addressed by `lead.email`.
    pub async fn update_lead(&self, lead: &Lead) -> Result<(), RdStationError> {
        let url = self.lead_url_by_email(&lead.email)?;
        let payload = encode(lead)?;
        self.transport.request(url, Method::PATCH, Some(payload)).await?;
        Ok(())
    }

    /// Merges `tags` into `lead.tags` (see [`merge_added_tags`]) and PATCHes
    /// the result.
    ///
    /// `lead` is updated before the request is sent and is not rolled back
    /// if the request fails.
    pub async fn add_tags(&self, lead: &mut Lead, tags: &[&str]) -> Result<(), RdStationError> {
        merge_added_tags(&mut lead.tags, tags);
        debug!("Adding tags {tags:?} to {}", lead.email);

        self.patch_tags(&lead.email, &TagsPatch::after_add(&lead.tags))
            .await
    }

    /// Removes `tags` from `lead.tags` and PATCHes the result. A lead that
    /// never had tags sends `{"tags": []}` and keeps `None` in memory.
    pub async fn remove_tags(&self, lead: &mut Lead, tags: &[&str]) -> Result<(), RdStationError> {
        strip_removed_tags(&mut lead.tags, tags);
        debug!("Removing tags {tags:?} from {}", lead.email);

        self.patch_tags(&lead.email, &TagsPatch::after_remove(&lead.tags))
            .await
    }

    async fn patch_tags(&self, email: &str, patch: &TagsPatch<'_>) -> Result<(), RdStationError> {
        let url = self.lead_url_by_email(email)?;
        let payload = encode(patch)?;
        self.transport.request(url, Method::PATCH, Some(payload)).await?;
        Ok(())
    }

    #[track_caller]
    fn lead_url_by_email(&self, email: &str) -> Result<Url, RdStationError> {
        Ok(self.base_url.join(&format!("{RD_LEAD_PATH}email:{email}"))?)
    }
}

#[track_caller]
fn encode<S: Serialize + ?Sized>(value: &S) -> Result<Vec<u8>, RdStationError> {
    serde_json::to_vec(value).map_err(|e| RdStationError::serialization(&e))
}
