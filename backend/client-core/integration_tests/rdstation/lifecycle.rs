//! Lead operations end to end against a mock `platform/contacts`.

use crate::support::{connected_client, not_found_body};

use rdstation_client::{ACADEMY_ACTIVE, ACADEMY_CANCELLED, EMAIL_OPT_OUT, Lead};

use common::HttpStatusCode;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMAIL: &str = "test@test.com";
const LEAD_PATH: &str = "/platform/contacts/email:test@test.com";

/// **VALUE**: Walks a lead through create, read, tag changes, update and delete.
///
/// **WHY THIS MATTERS**: This is how callers actually use the client; every
/// step must hit the right method, path and body.
///
/// **BUG THIS CATCHES**: Wrong verbs, wrong paths, tags bodies that drift from the
/// in-memory lead, or a deleted lead still being found.
#[tokio::test]
async fn given_mock_api_when_running_lead_lifecycle_then_each_call_hits_expected_endpoint() {
    // GIVEN: A mock contacts API
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/platform/contacts/"))
        .and(body_json(json!({"name": "Test", "email": EMAIL})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "5408c5a3-4711-4f2e-8d0b-13407a3e30f3",
            "name": "Test",
            "email": EMAIL
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LEAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "5408c5a3-4711-4f2e-8d0b-13407a3e30f3",
            "name": "Test",
            "email": EMAIL,
            "tags": [ACADEMY_CANCELLED, "newsletter"],
            "legal_bases": [{"category": "communications", "type": "consent"}]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(LEAD_PATH))
        .and(body_json(json!({"tags": ["newsletter", ACADEMY_ACTIVE]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(LEAD_PATH))
        .and(body_json(json!({"tags": []})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(LEAD_PATH))
        .and(body_json(json!({
            "uuid": "5408c5a3-4711-4f2e-8d0b-13407a3e30f3",
            "name": "Test",
            "email": EMAIL,
            "city": "Recife"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(LEAD_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LEAD_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&server)
        .await;

    // WHEN: Creating
    let draft = Lead {
        name: "Test".to_string(),
        email: EMAIL.to_string(),
        ..Lead::default()
    };
    let created = client.create_lead(&draft).await.unwrap();

    // THEN: The API-assigned uuid comes back
    assert_eq!(created.uuid, "5408c5a3-4711-4f2e-8d0b-13407a3e30f3");

    // WHEN: Reading it back
    let mut lead = client.get_lead_by_email(EMAIL).await.unwrap();

    // THEN: Unknown fields are ignored and tags are present
    assert!(lead.has_tag(ACADEMY_CANCELLED));

    // WHEN: Activating the academy subscription
    client.add_tags(&mut lead, &[ACADEMY_ACTIVE]).await.unwrap();

    // THEN: The cancelled tag is gone locally too
    assert_eq!(
        lead.tags,
        Some(vec!["newsletter".to_string(), ACADEMY_ACTIVE.to_string()])
    );

    // WHEN: Removing every tag
    client
        .remove_tags(&mut lead, &[ACADEMY_ACTIVE, "newsletter"])
        .await
        .unwrap();
    assert_eq!(lead.tags, Some(vec![]));

    // WHEN: Updating a field; the empty tag list is left out of the body
    lead.city = "Recife".to_string();
    client.update_lead(&lead).await.unwrap();

    // WHEN: Deleting
    client.delete_lead_by_email(EMAIL).await.unwrap();

    // THEN: The lead is no longer found
    let err = client.get_lead_by_email(EMAIL).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(HttpStatusCode::NOT_FOUND));
}

/// **VALUE**: Verifies a create answered with `201 Created` is reported as a remote error.
///
/// **WHY THIS MATTERS**: Only `200 OK` is success; the lead body is decoded
/// leniently as an error envelope with the real status.
///
/// **BUG THIS CATCHES**: Quietly widening success to any 2xx.
#[tokio::test]
async fn given_create_answered_with_201_when_creating_then_remote_error_with_201() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/platform/contacts/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "abc", "email": EMAIL})))
        .mount(&server)
        .await;

    let draft = Lead {
        email: EMAIL.to_string(),
        ..Lead::default()
    };

    let err = client.create_lead(&draft).await.unwrap_err();

    let remote = err.remote_error().expect("remote error");
    assert_eq!(remote.status_code(), HttpStatusCode::CREATED);
    assert!(remote.errors.error_type.is_empty());
}

/// **VALUE**: Verifies adding a tag to a lead with no tags field sends just that tag.
///
/// **WHY THIS MATTERS**: Fresh leads come back without `tags`; the first tag must still land.
///
/// **BUG THIS CATCHES**: Sending `null` when something was added.
#[tokio::test]
async fn given_lead_without_tags_when_adding_opt_out_then_patch_sends_single_tag() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("PATCH"))
        .and(path(LEAD_PATH))
        .and(body_json(json!({"tags": [EMAIL_OPT_OUT]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut lead = Lead {
        email: EMAIL.to_string(),
        ..Lead::default()
    };

    client.add_tags(&mut lead, &[EMAIL_OPT_OUT]).await.unwrap();

    assert_eq!(lead.tags, Some(vec![EMAIL_OPT_OUT.to_string()]));
}

/// **VALUE**: Verifies a failed tag PATCH surfaces the remote error and keeps the local change.
///
/// **WHY THIS MATTERS**: Callers must know the server state may differ from memory.
///
/// **BUG THIS CATCHES**: Swallowing the failure.
#[tokio::test]
async fn given_patch_rejected_when_removing_tags_then_error_and_local_tags_changed() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("PATCH"))
        .and(path(LEAD_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&server)
        .await;

    let mut lead = Lead {
        email: EMAIL.to_string(),
        tags: Some(vec!["a".to_string(), "b".to_string()]),
        ..Lead::default()
    };

    let err = client.remove_tags(&mut lead, &["a"]).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(lead.tags, Some(vec!["b".to_string()]));
}
