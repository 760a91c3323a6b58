pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use config::{DatasetConfig, GeneratorConfig, ScraperConfig};
pub use error::ServiceError;
pub use module::Module;
pub use types::{now_rfc3339, percent_encode};
