use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::init_logging;
use flowdeck::client::{StaticTokenProvider, ViewPhase, WorkflowsClient, WorkflowsView};

const TEST_TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> WorkflowsClient {
    WorkflowsClient::new(server.uri(), Arc::new(StaticTokenProvider::new(TEST_TOKEN)))
}

fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

async fn mock_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/workflows"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_sync_scenario() {
    init_logging();
    let server = MockServer::start().await;

    mock_list(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/workflows"))
        .and(header("Authorization", bearer().as_str()))
        .and(body_json(json!({ "name": "Onboarding" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 1, "name": "Onboarding" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/workflows/1"))
        .and(body_json(json!({ "name": "Onboarding v2" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "Onboarding v2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/workflows/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "Onboarding v2" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = WorkflowsView::new();

    view.load(&client).await;
    assert_eq!(view.phase(), ViewPhase::Ready);
    assert!(view.workflows().is_empty());

    view.set_new_name("Onboarding");
    view.submit_new(&client).await;
    assert_eq!(view.workflows().len(), 1);
    assert_eq!(view.workflows()[0].name, "Onboarding");
    assert_eq!(view.new_name(), "");
    assert!(view.mutation_error().is_none());

    view.start_edit(1);
    view.set_edit_draft("Onboarding v2");
    view.submit_edit(&client).await;
    assert_eq!(view.workflows()[0].name, "Onboarding v2");
    assert!(view.editing().is_none());

    view.request_delete(1);
    view.confirm_delete(&client).await;
    assert!(view.workflows().is_empty());
    assert_eq!(view.phase(), ViewPhase::Ready);
    assert!(view.mutation_error().is_none());
    assert!(!view.is_busy());
}

#[tokio::test]
async fn test_empty_name_never_reaches_the_network() {
    init_logging();
    let server = MockServer::start().await;

    mock_list(&server, json!([{ "id": 1, "name": "Onboarding" }])).await;
    Mock::given(method("POST"))
        .and(path("/api/workflows"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/workflows/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = WorkflowsView::new();
    view.load(&client).await;

    view.set_new_name("   ");
    view.submit_new(&client).await;
    assert_eq!(view.mutation_error(), Some("Name is required"));
    assert_eq!(view.workflows().len(), 1);

    view.start_edit(1);
    view.set_edit_draft("  ");
    view.submit_edit(&client).await;
    assert_eq!(view.mutation_error(), Some("Name is required"));
    // The edit session stays open for the user to correct the draft.
    assert!(view.editing().is_some());
}

#[tokio::test]
async fn test_stale_update_surfaces_not_found_and_keeps_cache() {
    init_logging();
    let server = MockServer::start().await;

    mock_list(&server, json!([{ "id": 1, "name": "Onboarding" }])).await;
    Mock::given(method("PUT"))
        .and(path("/api/workflows/1"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Workflow not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = WorkflowsView::new();
    view.load(&client).await;

    view.start_edit(1);
    view.set_edit_draft("Renamed");
    view.submit_edit(&client).await;

    assert!(view.mutation_error().is_some());
    assert_eq!(view.phase(), ViewPhase::Ready);
    assert_eq!(view.workflows()[0].name, "Onboarding");
    assert!(view.editing().is_some());
}

#[tokio::test]
async fn test_failed_load_blocks_the_list() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/workflows"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to fetch workflows" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = WorkflowsView::new();
    view.load(&client).await;

    assert_ne!(view.phase(), ViewPhase::Ready);
    assert!(view.load_error().is_some());
    assert!(view.workflows().is_empty());
    assert!(view.mutation_error().is_none());
}

#[tokio::test]
async fn test_rejected_credential_returns_to_login() {
    init_logging();
    let server = MockServer::start().await;

    mock_list(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/workflows"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = WorkflowsView::new();
    view.load(&client).await;
    assert_eq!(view.phase(), ViewPhase::Ready);

    view.set_new_name("Onboarding");
    view.submit_new(&client).await;

    assert_eq!(view.phase(), ViewPhase::Unauthenticated);
}

#[tokio::test]
async fn test_declined_delete_issues_no_request() {
    init_logging();
    let server = MockServer::start().await;

    mock_list(&server, json!([{ "id": 1, "name": "Onboarding" }])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/workflows/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = WorkflowsView::new();
    view.load(&client).await;

    view.request_delete(1);
    view.cancel_delete();
    view.confirm_delete(&client).await;

    assert_eq!(view.workflows().len(), 1);
    assert!(view.pending_delete().is_none());
}

#[tokio::test]
async fn test_failed_delete_keeps_cache() {
    init_logging();
    let server = MockServer::start().await;

    mock_list(&server, json!([{ "id": 1, "name": "Onboarding" }])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/workflows/1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to delete workflow" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = WorkflowsView::new();
    view.load(&client).await;

    view.request_delete(1);
    view.confirm_delete(&client).await;

    assert!(view.mutation_error().is_some());
    assert_eq!(view.workflows().len(), 1);
    assert_eq!(view.phase(), ViewPhase::Ready);
}
