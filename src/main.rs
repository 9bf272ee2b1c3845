//! Polly Dashboard Server
//!
//! Run with: cargo run --bin polly-dashboard
//!
//! Configuration is read from the first of
//! `~/.config/polly-dashboard/config.toml`, `/etc/polly-dashboard/config.toml`
//! and `./config.toml`, then overridden by `POLLY_DASHBOARD_*` environment
//! variables. `RUST_LOG` overrides the configured log level.

use polly_dashboard::api::{serve, ApiConfig, AppState};
use polly_dashboard::{logging, Config, InventoryPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    logging::init(&config.logging);

    tracing::info!("Starting Polly dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Inventory endpoint: {}", config.inventory.endpoint);
    tracing::info!(
        "Render mode: {:?}, failure policy: {:?}, refresh policy: {:?}",
        config.render.mode,
        config.dashboard.failure_policy,
        config.dashboard.refresh_policy
    );

    let pipeline = InventoryPipeline::from_config(&config)?;
    let api_config = ApiConfig::from_config(&config);

    serve(AppState::new(pipeline, api_config.clone()), &api_config).await?;

    tracing::info!("Polly dashboard stopped");
    Ok(())
}
