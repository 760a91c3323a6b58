use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use instacook_core::ServiceError;

use super::ApiState;
use crate::engine::FlowSnapshot;
use crate::model::ScrapeRequest;

// ---------------------------------------------------------------------------
// POST /flow
// ---------------------------------------------------------------------------

/// Start a new invocation. Supersedes any in-flight invocation.
pub async fn start(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let invocation = state.engine.start(&req.username).await?;
    Ok(Json(serde_json::json!({"invocation": invocation})))
}

// ---------------------------------------------------------------------------
// GET /flow
// ---------------------------------------------------------------------------

/// Current flow snapshot, for polling by the page.
pub async fn snapshot(State(state): State<Arc<ApiState>>) -> Json<FlowSnapshot> {
    Json(state.engine.snapshot().await)
}
