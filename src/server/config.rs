use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::server::{
    handlers::{
        health::{service_status, test_db},
        workflow::{create_workflow, delete_workflow, list_workflows, update_workflow},
    },
    services::{auth::AuthService, workflow_database::WorkflowDatabaseService},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: Arc<AuthService>,
    pub workflow_db: Arc<WorkflowDatabaseService>,
}

pub fn configure_app(pool: PgPool) -> Router {
    let auth = Arc::new(AuthService::new());
    let workflow_db = Arc::new(WorkflowDatabaseService::new(pool.clone()));

    let state = AppState {
        pool,
        auth,
        workflow_db,
    };

    app_router(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

// Credential check runs before any handler touches storage.
async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    match state.auth.authorize(request.headers()) {
        Ok(()) => Ok(next.run(request).await),
        Err(e) => {
            warn!("Rejected request: {}", e);
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            ))
        }
    }
}

fn app_router(state: AppState) -> Router {
    let workflows = Router::new()
        .route("/api/workflows", get(list_workflows).post(create_workflow))
        .route(
            "/api/workflows/:id",
            put(update_workflow).delete(delete_workflow),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(service_status))
        .route("/api/test-db", get(test_db))
        .merge(workflows)
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
