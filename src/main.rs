//! Spread Tracker - web API over Buda market spreads

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spread_tracker::{api, AppState, Config, SqliteAlertStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Starting Spread Tracker");

    let config = Config::load()?;
    info!(
        base_url = %config.buda_api_base_url,
        listen_addr = %config.listen_addr,
        "Configuration loaded"
    );

    let store =
        SqliteAlertStore::connect(&config.database_url, config.database_max_connections).await?;
    let state = Arc::new(AppState::new(&config, Arc::new(store)));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Starting web API server");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Spread Tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
