//! `instacookd` — the Instacook server binary.
//!
//! Usage:
//!   instacookd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/instacook/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use clap::Parser;
use instacook_core::Module;
use instacook_roast::RoastModule;
use tracing::info;

use config::ServerConfig;

/// Instacook server.
#[derive(Parser, Debug)]
#[command(name = "instacookd", about = "Instacook roast server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the configured one).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    // Verify configuration is valid.
    bootstrap::verify_config(&server_config)?;

    // Initialize the roast module from explicit config.
    let roast_module = RoastModule::new(
        &server_config.scraper,
        &server_config.generator,
        &server_config.dataset,
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize roast module: {}", e))?;
    info!(
        "Roast module initialized ({} generation credentials)",
        server_config.generator.api_keys.len()
    );

    let module_routes = vec![(roast_module.name(), roast_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listen = cli.listen.unwrap_or(server_config.server.listen.clone());
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("Instacook server listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
