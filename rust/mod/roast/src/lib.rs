pub mod api;
pub mod dataset;
pub mod engine;
pub mod generate;
pub mod model;
pub mod normalize;
pub mod proxy;
pub mod scrape;

use std::sync::Arc;

use axum::Router;
use instacook_core::{DatasetConfig, GeneratorConfig, Module, ScraperConfig, ServiceError};

use dataset::{ApifyDataset, DatasetSink};
use engine::RoastEngine;
use generate::{GeminiBackend, RoastGenerator};
use scrape::{ApifyScraper, ProfileFetcher};

/// The Roast module — profile fetch, roast generation, interaction
/// logging, image proxy, and the invocation workflow.
pub struct RoastModule {
    engine: Arc<RoastEngine>,
}

impl RoastModule {
    /// Wire the providers from configuration. Fails when no generation
    /// credential is configured.
    pub fn new(
        scraper: &ScraperConfig,
        generator: &GeneratorConfig,
        dataset: &DatasetConfig,
    ) -> Result<Self, ServiceError> {
        let fetcher = ProfileFetcher::new(Arc::new(ApifyScraper::new(scraper)));
        let roast_generator = RoastGenerator::new(
            Arc::new(GeminiBackend::new(generator)),
            generator.api_keys.clone(),
        )?;
        let sink = dataset
            .enabled
            .then(|| Arc::new(ApifyDataset::new(dataset)) as Arc<dyn DatasetSink>);

        Ok(Self {
            engine: Arc::new(RoastEngine::new(fetcher, roast_generator, sink)),
        })
    }

    /// Access the engine (used by tests and embedding binaries).
    pub fn engine(&self) -> &Arc<RoastEngine> {
        &self.engine
    }
}

impl Module for RoastModule {
    fn name(&self) -> &str {
        "api"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.engine))
    }
}
