//! Profile Fetcher — identity lookup against the scraping provider.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use instacook_core::{ScraperConfig, ServiceError};

use crate::model::ProfileRecord;
use crate::normalize::normalize_profile;

/// Provider seam for the identity lookup.
///
/// One operation: run the provider's user search for a username and
/// return the raw result items. Implementations own transport details;
/// the fetcher owns validation and normalization.
#[async_trait::async_trait]
pub trait ProfileScraper: Send + Sync {
    async fn lookup(&self, username: &str) -> Result<Vec<Value>, ServiceError>;
}

/// Apify-backed scraper: runs the configured actor task synchronously
/// and reads back the produced dataset items.
pub struct ApifyScraper {
    http: reqwest::Client,
    config: ScraperConfig,
}

impl ApifyScraper {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ProfileScraper for ApifyScraper {
    async fn lookup(&self, username: &str) -> Result<Vec<Value>, ServiceError> {
        let url = format!(
            "{}/actor-tasks/{}/run-sync-get-dataset-items",
            self.config.base_url, self.config.actor_task
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(&serde_json::json!({
                "username": username,
                "searchType": "user",
                "searchLimit": self.config.search_limit,
            }))
            .send()
            .await
            .map_err(|e| ServiceError::Provider(format!("scrape request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Provider(format!(
                "scrape provider returned {}: {}",
                status, body
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::Provider(format!("scrape response parse failed: {}", e)))?;

        // The actor normally returns an array of items; tolerate a bare
        // object as a single-item result.
        match data {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}

/// The Profile Fetcher: username in, normalized ProfileRecord out.
#[derive(Clone)]
pub struct ProfileFetcher {
    scraper: Arc<dyn ProfileScraper>,
}

impl ProfileFetcher {
    pub fn new(scraper: Arc<dyn ProfileScraper>) -> Self {
        Self { scraper }
    }

    /// Fetch and normalize the public profile for `username`.
    ///
    /// Fails with `Validation` on empty input, `Provider` on transport
    /// or upstream failure, and `ProfileNotFound` when the lookup
    /// returns no items or only an empty record.
    pub async fn fetch_profile(&self, username: &str) -> Result<ProfileRecord, ServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ServiceError::Validation("username is required".into()));
        }

        debug!("fetching profile data for '{}'", username);
        let items = self.scraper.lookup(username).await?;

        let Some(first) = items.first() else {
            return Err(ServiceError::ProfileNotFound(format!(
                "no profile data found for '{}'",
                username
            )));
        };

        let profile = normalize_profile(first, username);
        if profile.is_empty_profile() {
            return Err(ServiceError::ProfileNotFound(format!(
                "no profile data found for '{}'",
                username
            )));
        }

        Ok(profile)
    }
}
