//! The feed service object behind the HTTP endpoints.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use metabolab_config::FeedSettings;

use crate::generator::SampleGenerator;
use crate::history::SampleHistory;
use crate::sample::SamplePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub history_capacity: usize,
    /// Points generated at construction, before any request is served.
    pub seed_points: usize,
    /// Trailing entries returned alongside each new point.
    pub window: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            history_capacity: 100,
            seed_points: 20,
            window: 20,
        }
    }
}

impl From<&FeedSettings> for FeedConfig {
    fn from(s: &FeedSettings) -> Self {
        Self {
            history_capacity: s.history_capacity,
            seed_points: s.seed_points,
            window: s.window,
        }
    }
}

/// Body of `GET /api/data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    pub current: SamplePoint,
    pub history: Vec<SamplePoint>,
    pub total: usize,
}

/// Body of `GET /api/initial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialResponse {
    pub history: Vec<SamplePoint>,
    pub total: usize,
}

struct FeedState {
    generator: SampleGenerator,
    history: SampleHistory,
}

impl FeedState {
    fn generate_and_append(&mut self) -> SamplePoint {
        let point = self.generator.generate();
        let evicted = self.history.append_and_trim(point.clone());
        if evicted > 0 {
            debug!(evicted, len = self.history.len(), "trimmed sample history");
        }
        point
    }
}

/// Owns the sample history and sequence counter for the process lifetime.
///
/// Generation and append-and-trim happen under one lock, so concurrent
/// pollers always observe a history that is capped and in generation order.
pub struct FeedService {
    state: Mutex<FeedState>,
    config: FeedConfig,
}

impl std::fmt::Debug for FeedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedService")
            .field("config", &self.config)
            .finish()
    }
}

impl FeedService {
    /// Build the service and synchronously seed its history.
    pub fn new(config: FeedConfig, generator: SampleGenerator) -> Self {
        let mut state = FeedState {
            generator,
            history: SampleHistory::with_capacity(config.history_capacity),
        };
        for _ in 0..config.seed_points {
            state.generate_and_append();
        }
        info!(
            seeded = state.history.len(),
            capacity = state.history.capacity(),
            "metabolome feed initialised"
        );
        Self {
            state: Mutex::new(state),
            config,
        }
    }

    pub fn from_entropy(config: FeedConfig) -> Self {
        Self::new(config, SampleGenerator::from_entropy())
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Generate one point, record it, and return it with the recent window.
    pub async fn fetch_one(&self) -> DataResponse {
        let mut state = self.state.lock().await;
        let current = state.generate_and_append();
        DataResponse {
            current,
            history: state.history.latest(self.config.window),
            total: state.history.len(),
        }
    }

    /// The full retained history; generates nothing.
    pub async fn fetch_initial(&self) -> InitialResponse {
        let state = self.state.lock().await;
        InitialResponse {
            history: state.history.snapshot(),
            total: state.history.len(),
        }
    }

    pub async fn total(&self) -> usize {
        self.state.lock().await.history.len()
    }
}
