use serde::Deserialize;

// Provider configuration is built once at process start (TOML file plus
// environment overrides in the binary) and passed by reference into the
// module constructors. Nothing reads credentials from ambient state.

/// Scraping provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Provider API base URL.
    pub base_url: String,

    /// Bearer token for the provider API.
    pub token: String,

    /// Actor task identifier to run for an identity lookup.
    pub actor_task: String,

    /// Result-count limit passed to the lookup. The fetcher only ever
    /// consumes the first item.
    pub search_limit: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.apify.com/v2".to_string(),
            token: String::new(),
            actor_task: "kyyril~all-scrap".to_string(),
            search_limit: 1,
        }
    }
}

/// Text-generation provider configuration.
///
/// `api_keys` is an ordered list of interchangeable credentials; the
/// generator tries them front to back (see the roast module). At least
/// one key must be present or bootstrap fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Provider API base URL.
    pub base_url: String,

    /// Model identifier.
    pub model: String,

    /// Ordered credential list, tried front to back.
    pub api_keys: Vec<String>,

    /// Sampling temperature.
    pub temperature: f64,

    /// Nucleus sampling parameter.
    pub top_p: f64,

    /// Top-k sampling parameter.
    pub top_k: u32,

    /// Maximum output length in tokens. Roasts are short by design.
    pub max_output_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash-8b".to_string(),
            api_keys: Vec::new(),
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 256,
        }
    }
}

/// Append-only dataset sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Sink API base URL.
    pub base_url: String,

    /// Bearer token for the sink API.
    pub token: String,

    /// Target dataset identifier.
    pub dataset_id: String,

    /// When false, interactions are not mirrored anywhere.
    pub enabled: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.apify.com/v2".to_string(),
            token: String::new(),
            dataset_id: String::new(),
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.max_output_tokens, 256);
        assert!(config.api_keys.is_empty());
    }

    #[test]
    fn scraper_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.search_limit, 1);
        assert!(config.token.is_empty());
    }
}
