//! VIGIL HTTP Server
//!
//! Ingests behavioral telemetry and serves fraud verdicts.

mod api;
mod config;
mod error;
mod state;

use crate::config::ServerConfig;
use crate::state::AppState;
use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log level can come from it
    let config = ServerConfig::load()?;
    init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config);
    let app = api::create_router(state);

    info!("Starting server on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/api/v1/health", addr);
    info!("  Session API:  http://{}/api/v1/sessions", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let default_filter = format!(
        "vigil_server={level},vigil_sdk={level},vigil_runtime={level},tower_http=debug",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
