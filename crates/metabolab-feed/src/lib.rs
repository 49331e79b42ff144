//! metabolab-feed — Mock metabolome data feed.
//!
//! Simulates a live analytical instrument for the demo site:
//!   - `sample`    — the point record served over HTTP and the chart's view of it
//!   - `source`    — injectable randomness and wall clock
//!   - `generator` — damped sinusoid plus noise, one point per call
//!   - `history`   — bounded FIFO of recent points
//!   - `service`   — the feed object behind `/api/data` and `/api/initial`
//!   - `client`    — chart-side poller with placeholder fallback

pub mod sample;
pub mod source;
pub mod generator;
pub mod history;
pub mod service;
pub mod client;

pub use sample::{Category, ChartPoint, SamplePoint};
pub use source::{Clock, FixedClock, RandSource, ScriptedUniform, SystemClock, UniformSource};
pub use generator::{SampleGenerator, Waveform};
pub use history::SampleHistory;
pub use service::{DataResponse, FeedConfig, FeedService, InitialResponse};
pub use client::{placeholder_points, ChartBatch, FeedClient, FeedPoller};
