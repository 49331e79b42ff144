//! Shared application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use metabolab_config::Config;
use metabolab_feed::{FeedConfig, FeedService};

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub feed: FeedService,
    /// Root of the built single-page app.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(feed: FeedService, static_dir: impl Into<PathBuf>) -> Self {
        Self { feed, static_dir: static_dir.into() }
    }

    /// Seeds a fresh feed from OS randomness and the system clock.
    pub fn from_config(config: &Config) -> Self {
        let feed = FeedService::from_entropy(FeedConfig::from(&config.feed));
        Self::new(feed, config.server.static_dir.clone())
    }
}

pub type SharedState = Arc<AppState>;
