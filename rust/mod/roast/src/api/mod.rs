//! HTTP surface of the roast module.
//!
//! Nested under `/api` by the binary, giving the original application
//! paths: `/api/scrape`, `/api/roast`, `/api/dataset`,
//! `/api/image-proxy`, `/api/flow`.

pub mod dataset;
pub mod flow;
pub mod image_proxy;
pub mod roast;
pub mod scrape;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::engine::RoastEngine;

/// Shared handler state.
pub struct ApiState {
    pub engine: Arc<RoastEngine>,
    /// Client for the image-proxy pass-through.
    pub http: reqwest::Client,
}

pub fn router(engine: Arc<RoastEngine>) -> Router {
    let state = Arc::new(ApiState {
        engine,
        http: reqwest::Client::new(),
    });

    Router::new()
        .route("/scrape", post(scrape::scrape))
        .route("/roast", post(roast::roast))
        .route("/dataset", post(dataset::append))
        .route("/image-proxy", get(image_proxy::image_proxy))
        .route("/flow", post(flow::start).get(flow::snapshot))
        .with_state(state)
}
