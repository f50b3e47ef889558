//! Segment HTTP Server Binary
//!
//! Loads configuration, sets up logging, and serves the REST API backed by a
//! fresh in-memory store.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin segment-server
//! ```
//!
//! # Environment Variables
//!
//! - `SEGMENT_SERVICE_CONFIG`: Path to a TOML config file (optional)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8090)
//! - `RUST_LOG`: Log filter (default: info)

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use segment_service::config::{LoggingSettings, ServiceConfig};
use segment_service::http::{create_router, AppState};

fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&settings.level)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", settings.level, e))?;

    fmt()
        .with_env_filter(filter)
        .with_target(settings.with_target)
        .with_thread_ids(settings.with_thread_ids)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load()?;
    init_logging(&config.logging)?;

    info!("Starting segment HTTP server");

    let state = AppState::in_memory();
    let app = create_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
