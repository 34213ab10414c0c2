use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::models::{CreateWorkflowRequest, UpdateWorkflowRequest, Workflow};
use crate::server::config::AppState;
use crate::server::services::workflow_database::WorkflowStoreError;

type ErrorResponse = (StatusCode, Json<Value>);

fn client_input_error(message: &str) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error() -> ErrorResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Workflow not found" })),
    )
}

// Storage detail stays in the logs; the client gets the category message.
fn service_error(message: &str) -> ErrorResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

pub async fn list_workflows(
    State(state): State<AppState>,
) -> Result<Json<Vec<Workflow>>, ErrorResponse> {
    let workflows = state.workflow_db.list_workflows().await.map_err(|e| {
        error!("Failed to list workflows: {:?}", e);
        service_error("Failed to fetch workflows")
    })?;

    Ok(Json(workflows))
}

pub async fn create_workflow(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkflowRequest>,
) -> Result<(StatusCode, Json<Workflow>), ErrorResponse> {
    let name = request
        .validated_name()
        .ok_or_else(|| client_input_error("Name is required"))?;

    let workflow = state.workflow_db.create_workflow(&name).await.map_err(|e| {
        error!("Failed to create workflow: {:?}", e);
        service_error("Failed to create workflow")
    })?;

    info!("Created workflow with id: {}", workflow.id);

    Ok((StatusCode::CREATED, Json(workflow)))
}

pub async fn update_workflow(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateWorkflowRequest>,
) -> Result<Json<Workflow>, ErrorResponse> {
    let name = request
        .validated_name()
        .ok_or_else(|| client_input_error("Name is required"))?;

    let workflow = state
        .workflow_db
        .update_workflow(id, &name)
        .await
        .map_err(|e| match e {
            WorkflowStoreError::NotFound { .. } => not_found_error(),
            e => {
                error!("Failed to update workflow {}: {:?}", id, e);
                service_error("Failed to update workflow")
            }
        })?;

    info!("Updated workflow with id: {}", workflow.id);

    Ok(Json(workflow))
}

pub async fn delete_workflow(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Workflow>, ErrorResponse> {
    let workflow = state
        .workflow_db
        .delete_workflow(id)
        .await
        .map_err(|e| match e {
            WorkflowStoreError::NotFound { .. } => not_found_error(),
            e => {
                error!("Failed to delete workflow {}: {:?}", id, e);
                service_error("Failed to delete workflow")
            }
        })?;

    info!("Deleted workflow with id: {}", workflow.id);

    Ok(Json(workflow))
}
