//! Shared fixtures for the integration tests.
//!
//! Every test gets its own `MockServer`; the client is pointed at it through
//! `RdStationConfig::for_base_url`.

use rdstation_client::{OAuthTransport, RdStationClient, RdStationConfig, Secret};

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "identificador-de-um-cliente";
pub const CLIENT_SECRET: &str = "shhhhh";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const ACCESS_TOKEN: &str = "access-1";
pub const DAY_SECS: i64 = 86_400;

pub fn secret() -> Secret {
    Secret::new(CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN)
}

pub fn config_for(server: &MockServer) -> RdStationConfig {
    RdStationConfig::for_base_url(&server.uri()).expect("mock server URI is a valid base")
}

pub fn token_body(access_token: &str, expires_in: i64, refresh_token: Option<&str>) -> Value {
    let mut body = json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "creation_date": "2026-01-01T00:00:00.000Z"
    });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
    }
    body
}

/// Mounts a token exchange answering with `ACCESS_TOKEN` valid for `expires_in` seconds.
pub async fn mount_token_exchange(server: &MockServer, expires_in: i64) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body(
                ACCESS_TOKEN,
                expires_in,
                Some(REFRESH_TOKEN),
            )),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// A transport already authenticated against `server`.
pub async fn connected_transport(server: &MockServer) -> OAuthTransport {
    mount_token_exchange(server, DAY_SECS).await;
    OAuthTransport::connect(secret(), &config_for(server))
        .await
        .expect("token exchange succeeds")
}

/// A lead client already authenticated against `server`.
pub async fn connected_client(server: &MockServer) -> RdStationClient {
    mount_token_exchange(server, DAY_SECS).await;
    RdStationClient::connect(secret(), &config_for(server))
        .await
        .expect("token exchange succeeds")
}

pub fn not_found_body() -> Value {
    json!({
        "errors": {
            "error_type": "RESOURCE_NOT_FOUND",
            "error_message": "The resource could not be found"
        }
    })
}
