//! spam-api: Spam Detector HTTP API

use spam_api::api::ApiServer;
use spam_api::loader::load_for_startup;
use spam_api::{Config, SpamApiError};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;
    config.validate()?;

    // Initialize logging
    let default_filter = if config.server.debug {
        "spam_api=debug,tower_http=debug"
    } else {
        "spam_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting spam-api v{}", env!("CARGO_PKG_VERSION"));
    match config_path {
        Some(ref path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No config file specified, using config.toml or defaults"),
    }

    let detector = load_for_startup(&config.artifacts).map_err(SpamApiError::Artifact)?;

    let server = ApiServer::new(config, detector);
    server.run().await?;

    Ok(())
}
