use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use instacook_core::ServiceError;

use super::ApiState;
use crate::proxy::relay_image;

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    #[serde(default)]
    pub url: String,
}

// ---------------------------------------------------------------------------
// GET /image-proxy?url=...
// ---------------------------------------------------------------------------

/// Same-origin relay: fetches the original image and streams it back,
/// so the browser never contacts the third-party host.
pub async fn image_proxy(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, ServiceError> {
    let (bytes, content_type) = relay_image(&state.http, &query.url).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
