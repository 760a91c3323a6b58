//! Server configuration — one TOML file plus environment overrides.
//!
//! Secrets normally come from the environment (`APIFY_API_TOKEN`,
//! `GEMINI_API_KEY_1`, `GEMINI_API_KEY_2`, `DATASET_ID`); the file
//! carries endpoints and tunables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use instacook_core::{DatasetConfig, GeneratorConfig, ScraperConfig};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub scraper: ScraperConfig,
    pub generator: GeneratorConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    ///
    /// A bare name resolves to `/etc/instacook/<name>.toml`; anything
    /// containing `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/instacook/{}.toml", name_or_path))
        }
    }

    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let mut config: ServerConfig = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse {}: {}", path.display(), e))?;
        config.apply_env();
        Ok(config)
    }

    /// Environment variables take precedence over file values.
    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("APIFY_API_TOKEN") {
            self.scraper.token = token.clone();
            self.dataset.token = token;
        }

        // Ordered credential list: key 1 first, then key 2.
        let env_keys: Vec<String> = ["GEMINI_API_KEY_1", "GEMINI_API_KEY_2"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .filter(|v| !v.is_empty())
            .collect();
        if !env_keys.is_empty() {
            self.generator.api_keys = env_keys;
        }

        if let Ok(id) = std::env::var("DATASET_ID") {
            self.dataset.dataset_id = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_bare_name() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/instacook/prod.toml")
        );
    }

    #[test]
    fn resolve_explicit_path() {
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
    }

    #[test]
    fn parse_full_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            listen = "127.0.0.1:9090"

            [scraper]
            token = "apify-token"

            [generator]
            api_keys = ["k1", "k2"]
            temperature = 0.9

            [dataset]
            dataset_id = "ds1"
            token = "apify-token"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen, "127.0.0.1:9090");
        assert_eq!(config.scraper.token, "apify-token");
        assert_eq!(config.generator.api_keys, vec!["k1", "k2"]);
        assert_eq!(config.generator.temperature, 0.9);
        // Untouched fields keep their defaults.
        assert_eq!(config.generator.top_k, 40);
        assert_eq!(config.dataset.dataset_id, "ds1");
        assert!(config.dataset.enabled);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert!(config.generator.api_keys.is_empty());
    }
}
