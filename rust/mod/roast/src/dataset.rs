//! Interaction Logger — best-effort mirror into an append-only dataset.
//!
//! Logging runs as a detached task with its own error channel: failures
//! are observed at warn level and never join the user-facing result.

use std::sync::Arc;

use tracing::{debug, warn};

use instacook_core::{DatasetConfig, ServiceError};

use crate::model::LogEntry;

/// Append seam for the external dataset store.
#[async_trait::async_trait]
pub trait DatasetSink: Send + Sync {
    async fn append(&self, entry: &LogEntry) -> Result<(), ServiceError>;
}

/// Apify dataset items endpoint.
pub struct ApifyDataset {
    http: reqwest::Client,
    config: DatasetConfig,
}

impl ApifyDataset {
    pub fn new(config: &DatasetConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl DatasetSink for ApifyDataset {
    async fn append(&self, entry: &LogEntry) -> Result<(), ServiceError> {
        let url = format!(
            "{}/datasets/{}/items",
            self.config.base_url, self.config.dataset_id
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(entry)
            .send()
            .await
            .map_err(|e| ServiceError::Provider(format!("dataset append failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ServiceError::Provider(format!(
                "dataset sink returned {}",
                resp.status()
            )));
        }

        Ok(())
    }
}

/// Fire-and-forget append. Returns immediately; the write happens on a
/// detached task and any failure is swallowed after logging.
pub fn log_interaction(sink: Arc<dyn DatasetSink>, entry: LogEntry) {
    tokio::spawn(async move {
        match sink.append(&entry).await {
            Ok(()) => debug!("interaction logged for '{}'", entry.username),
            Err(e) => warn!("dataset append failed for '{}': {}", entry.username, e),
        }
    });
}
