use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use instacook_core::ServiceError;

use super::ApiState;
use crate::model::{ProfileRecord, ScrapeRequest};

// ---------------------------------------------------------------------------
// POST /scrape
// ---------------------------------------------------------------------------

/// Stateless profile fetch: `{username}` in, ProfileRecord out.
pub async fn scrape(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ProfileRecord>, ServiceError> {
    let profile = state.engine.fetcher().fetch_profile(&req.username).await?;
    Ok(Json(profile))
}
