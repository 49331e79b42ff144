//! Chart-side feed client.
//!
//! Polls `/api/data` on a fixed interval while the chart's section is on
//! screen. When the feed is unreachable or answers with a non-success status
//! the chart still gets something to draw: a batch of locally synthesised
//! placeholder points. There are no retries; the next tick tries again.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use metabolab_common::{MetabolabError, Result};
use metabolab_config::ChartSettings;

use crate::sample::ChartPoint;
use crate::service::{DataResponse, InitialResponse};
use crate::source::{Clock, RandSource, SystemClock, UniformSource};

const PLACEHOLDER_CATEGORIES: [&str; 3] = ["Unknown", "Known", "Novel"];
const PLACEHOLDER_SPACING_MS: i64 = 3_000;

/// Thin HTTP client for the two feed endpoints.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_latest(&self) -> Result<DataResponse> {
        self.get_json("/api/data").await
    }

    pub async fn fetch_initial(&self) -> Result<InitialResponse> {
        self.get_json("/api/initial").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(MetabolabError::FeedUnavailable { status: status.as_u16() });
        }
        Ok(resp.json::<T>().await?)
    }
}

/// Points the chart draws when the feed cannot be reached.
///
/// Timestamps are spaced 3 s apart and end at `now`.
pub fn placeholder_points(
    count: usize,
    now: DateTime<Utc>,
    source: &mut dyn UniformSource,
) -> Vec<ChartPoint> {
    let now_ms = now.timestamp_millis();
    (0..count)
        .map(|i| {
            let back = (count - 1 - i) as i64 * PLACEHOLDER_SPACING_MS;
            let at = now - chrono::Duration::milliseconds(back);
            let value = source.next_unit() * 100.0;
            let metabolites = ((source.next_unit() * 50.0).floor() as u32).min(49) + 10;
            let confidence = source.next_unit() * 0.5 + 0.5;
            let idx = (source.next_unit() * PLACEHOLDER_CATEGORIES.len() as f64).floor() as usize;
            ChartPoint {
                timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
                time: now_ms - back,
                value,
                metabolites,
                confidence,
                category: PLACEHOLDER_CATEGORIES[idx.min(PLACEHOLDER_CATEGORIES.len() - 1)].to_string(),
            }
        })
        .collect()
}

/// One chart refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartBatch {
    pub points: Vec<ChartPoint>,
    /// False when `points` are placeholders.
    pub live: bool,
}

pub struct FeedPoller {
    client: FeedClient,
    interval: Duration,
    fallback_points: usize,
    source: Box<dyn UniformSource + Send>,
    clock: Box<dyn Clock + Send>,
}

impl FeedPoller {
    pub fn new(client: FeedClient, settings: &ChartSettings) -> Self {
        Self {
            client,
            interval: Duration::from_millis(settings.poll_interval_ms.max(1)),
            fallback_points: settings.fallback_points,
            source: Box::new(RandSource::from_entropy()),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_sources(
        mut self,
        source: impl UniformSource + Send + 'static,
        clock: impl Clock + Send + 'static,
    ) -> Self {
        self.source = Box::new(source);
        self.clock = Box::new(clock);
        self
    }

    /// Fetch once, substituting placeholders on failure.
    pub async fn poll_once(&mut self) -> ChartBatch {
        match self.client.fetch_latest().await {
            Ok(resp) => ChartBatch {
                points: resp.history.into_iter().map(ChartPoint::from).collect(),
                live: true,
            },
            Err(e) => {
                warn!("Feed unavailable at {}: {}; using placeholder data", self.client.base_url(), e);
                ChartBatch {
                    points: placeholder_points(self.fallback_points, self.clock.now(), self.source.as_mut()),
                    live: false,
                }
            }
        }
    }

    /// Poll while `visible` is true, publishing each batch on `batches`.
    ///
    /// Polling pauses while hidden and the task returns once the visibility
    /// sender or every batch receiver is dropped.
    pub async fn run(mut self, mut visible: watch::Receiver<bool>, batches: watch::Sender<ChartBatch>) {
        loop {
            loop {
                let shown = *visible.borrow_and_update();
                if shown {
                    break;
                }
                if visible.changed().await.is_err() {
                    return;
                }
            }

            debug!(interval_ms = self.interval.as_millis() as u64, "chart visible, polling feed");
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let batch = self.poll_once().await;
                        if batches.send(batch).is_err() {
                            return;
                        }
                    }
                    changed = visible.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !*visible.borrow_and_update() {
                            debug!("chart hidden, polling paused");
                            break;
                        }
                    }
                }
            }
        }
    }
}
