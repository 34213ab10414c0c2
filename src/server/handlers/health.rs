use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::error;

use crate::server::config::AppState;

pub async fn service_status() -> Json<Value> {
    Json(json!({ "status": "Server is running" }))
}

pub async fn test_db(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let server_time = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
        .fetch_one(&state.pool)
        .await
        .map_err(|e| {
            error!("Database error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database error" })),
            )
        })?;

    Ok(Json(json!({ "success": true, "server_time": server_time })))
}
