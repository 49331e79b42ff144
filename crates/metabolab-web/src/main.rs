//! Metabolab feed server
//!
//! Run with: cargo run -p metabolab-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use metabolab_config::Config;
use metabolab_web::{router::{build_router, data_url}, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Metabolab feed server...");

    let config = Config::load()?;
    let state = AppState::from_config(&config);
    info!(static_dir = %config.server.static_dir.display(), "serving app shell");

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!("Server running on port {}", addr.port());
    info!("API available at {}", data_url(addr.port()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
