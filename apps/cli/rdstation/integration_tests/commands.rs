//! Commands executed against a mock RD Station API.

use rdstation_cli::commands::{Command, execute};
use rdstation_cli::error::EXIT_NOT_FOUND;

use rdstation_client::{RdStationClient, RdStationConfig, Secret};

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMAIL: &str = "test@test.com";
const LEAD_PATH: &str = "/platform/contacts/email:test@test.com";

async fn connected_client(server: &MockServer) -> RdStationClient {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "expires_in": 86400,
            "refresh_token": "refresh-1"
        })))
        .mount(server)
        .await;

    let config = RdStationConfig::for_base_url(&server.uri()).unwrap();
    RdStationClient::connect(Secret::new("client", "secret", "refresh-1"), &config)
        .await
        .unwrap()
}

/// **VALUE**: Verifies `get` prints the lead as JSON on the output stream.
///
/// **WHY THIS MATTERS**: Scripts pipe this output into other tools.
///
/// **BUG THIS CATCHES**: Log lines or debug formatting leaking into stdout.
#[tokio::test]
async fn given_existing_lead_when_executing_get_then_prints_lead_json() {
    // GIVEN: A lead on the mock API
    let server = MockServer::start().await;
    let client = connected_client(&server).await;
    Mock::given(method("GET"))
        .and(path(LEAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Test",
            "email": EMAIL,
            "tags": ["newsletter"]
        })))
        .mount(&server)
        .await;

    // WHEN: Running `get`
    let mut out = Vec::new();
    execute(&client, &Command::Get { email: EMAIL.to_string() }, &mut out)
        .await
        .unwrap();

    // THEN: The output is exactly the lead
    let printed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed, json!({"name": "Test", "email": EMAIL, "tags": ["newsletter"]}));
}

/// **VALUE**: Verifies `add-tags` reads the lead, PATCHes merged tags and prints them.
///
/// **WHY THIS MATTERS**: The merge needs the current tags, so the read must come first.
///
/// **BUG THIS CATCHES**: PATCHing only the new tags and wiping the existing ones.
#[tokio::test]
async fn given_tagged_lead_when_executing_add_tags_then_patches_merged_tags() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;
    Mock::given(method("GET"))
        .and(path(LEAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": EMAIL,
            "tags": ["exac", "newsletter"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(LEAD_PATH))
        .and(body_json(json!({"tags": ["newsletter", "acativo"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::AddTags {
        email: EMAIL.to_string(),
        tags: vec![String::from("acativo")],
    };
    let mut out = Vec::new();
    execute(&client, &command, &mut out).await.unwrap();

    let printed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed, json!(["newsletter", "acativo"]));
}

/// **VALUE**: Verifies deleting a missing lead fails with the not-found exit status.
///
/// **WHY THIS MATTERS**: Callers distinguish "already gone" from real failures.
///
/// **BUG THIS CATCHES**: The remote 404 being flattened into a generic error.
#[tokio::test]
async fn given_missing_lead_when_executing_delete_then_not_found_exit_status() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;
    Mock::given(method("DELETE"))
        .and(path(LEAD_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": {"error_type": "RESOURCE_NOT_FOUND", "error_message": "not found"}
        })))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = execute(&client, &Command::Delete { email: EMAIL.to_string() }, &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.exit_status(), EXIT_NOT_FOUND);
    assert!(out.is_empty());
}
