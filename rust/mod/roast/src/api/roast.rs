use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use instacook_core::ServiceError;

use super::ApiState;
use crate::model::{RoastRequest, RoastResponse};

// ---------------------------------------------------------------------------
// POST /roast
// ---------------------------------------------------------------------------

/// Stateless roast generation: `{profileData}` in, `{roast}` out.
pub async fn roast(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<RoastRequest>,
) -> Result<Json<RoastResponse>, ServiceError> {
    let roast = state
        .engine
        .generator()
        .generate_roast(&req.profile_data)
        .await?;
    Ok(Json(RoastResponse { roast }))
}
