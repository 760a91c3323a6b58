//! Pre-flight configuration checks, run before anything binds or spawns.

use anyhow::bail;
use tracing::warn;

use crate::config::ServerConfig;

/// Verify the configuration is usable. Fails fast on anything the
/// modules would otherwise only discover mid-request.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.scraper.token.is_empty() {
        bail!("scraper token is not configured (set [scraper].token or APIFY_API_TOKEN)");
    }

    if config.generator.api_keys.is_empty() {
        bail!(
            "no generation credentials configured (set [generator].api_keys or GEMINI_API_KEY_1)"
        );
    }

    if config.dataset.enabled {
        if config.dataset.dataset_id.is_empty() {
            bail!("dataset logging enabled but dataset_id is empty (set DATASET_ID or disable)");
        }
        if config.dataset.token.is_empty() {
            bail!("dataset logging enabled but token is empty");
        }
    } else {
        warn!("dataset logging disabled; interactions will not be mirrored");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.scraper.token = "t".into();
        config.generator.api_keys = vec!["k1".into()];
        config.dataset.token = "t".into();
        config.dataset.dataset_id = "ds".into();
        config
    }

    #[test]
    fn accepts_valid_config() {
        assert!(verify_config(&valid()).is_ok());
    }

    #[test]
    fn rejects_missing_generation_keys() {
        let mut config = valid();
        config.generator.api_keys.clear();
        assert!(verify_config(&config).is_err());
    }

    #[test]
    fn rejects_missing_scraper_token() {
        let mut config = valid();
        config.scraper.token.clear();
        assert!(verify_config(&config).is_err());
    }

    #[test]
    fn disabled_dataset_needs_no_id() {
        let mut config = valid();
        config.dataset.enabled = false;
        config.dataset.dataset_id.clear();
        config.dataset.token.clear();
        assert!(verify_config(&config).is_ok());
    }
}
