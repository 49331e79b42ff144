//! Axum router — API routes plus the single-page app shell.

use axum::{routing::get, Router};
use tower_http::{
    services::{ServeDir, ServeFile},
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::feed::{api_data, api_initial};

pub const DATA_PATH: &str = "/api/data";
pub const INITIAL_PATH: &str = "/api/initial";

/// Where a local chart should poll for new points.
pub fn data_url(port: u16) -> String {
    format!("http://localhost:{port}{DATA_PATH}")
}

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    // Client-side routing: any path without a matching file gets the shell.
    let index = state.static_dir.join("index.html");
    let spa = ServeDir::new(&state.static_dir).fallback(ServeFile::new(index));

    let shared: SharedState = Arc::new(state);

    Router::new()
        .route(DATA_PATH,    get(api_data))
        .route(INITIAL_PATH, get(api_initial))

        .fallback_service(spa)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
