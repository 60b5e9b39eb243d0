use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod extract;
mod middleware;
mod models;
mod routes;
mod state;

use common::config::ServerConfig;
use tokio::net::TcpListener;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting movie API service");

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr();
    let env = config.env;

    let app = routes::create_router(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, env = %env, "starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
