use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use instacook_core::{ServiceError, now_rfc3339};

use super::ApiState;
use crate::dataset::log_interaction;
use crate::model::LogEntry;

// ---------------------------------------------------------------------------
// POST /dataset
// ---------------------------------------------------------------------------

/// Fire-and-forget interaction log. Accepting the entry is the whole
/// contract; the sink write happens detached and its outcome never
/// surfaces here.
pub async fn append(
    State(state): State<Arc<ApiState>>,
    Json(mut entry): Json<LogEntry>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    if entry.timestamp.is_empty() {
        entry.timestamp = now_rfc3339();
    }

    if let Some(sink) = state.engine.sink() {
        log_interaction(Arc::clone(sink), entry);
    }

    Ok(Json(serde_json::json!({"success": true})))
}
