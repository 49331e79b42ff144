//! Poll a running feed the way the chart does and log each batch.
//!
//! Run with: cargo run -p metabolab-web --bin poll_feed -- [BASE_URL] [BATCHES]

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use metabolab_config::Config;
use metabolab_feed::{ChartBatch, FeedClient, FeedPoller};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| format!("http://localhost:{}", config.server.port));
    let batches: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 5,
    };

    let client = FeedClient::new(
        base_url.clone(),
        Duration::from_millis(config.chart.request_timeout_ms),
    )?;

    match client.fetch_initial().await {
        Ok(initial) => info!(points = initial.history.len(), total = initial.total, "initial history"),
        Err(e) => warn!("Initial fetch from {} failed: {}", base_url, e),
    }

    let poller = FeedPoller::new(client, &config.chart);
    let (visible_tx, visible_rx) = watch::channel(true);
    let (batch_tx, mut batch_rx) = watch::channel(ChartBatch::default());
    let task = tokio::spawn(poller.run(visible_rx, batch_tx));

    for n in 1..=batches {
        if batch_rx.changed().await.is_err() {
            break;
        }
        let batch = batch_rx.borrow_and_update().clone();
        let newest = batch.points.last();
        info!(
            batch = n,
            live = batch.live,
            points = batch.points.len(),
            newest_value = newest.map(|p| p.value),
            newest_category = newest.map(|p| p.category.as_str()),
            "chart batch"
        );
    }

    drop(visible_tx);
    task.await?;
    Ok(())
}
