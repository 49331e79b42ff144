//! Headless replay of a scroll session through the full progress pipeline.
//!
//! Run with: cargo run -p metabolab-scroll --bin replay_scroll

use std::rc::Rc;

use metabolab_config::Config;
use metabolab_scroll::{
    FrameScheduler, InertiaConfig, ManualFrames, PageRoot, ProgressBroadcaster, RevealGate,
    ScrollContainer, SpringConfig, VirtualPage, VisibleRange,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Page sections and the progress past which each one animates in.
const SECTIONS: [(&str, f64); 6] = [
    ("transition", 0.10),
    ("breakthrough", 0.30),
    ("case-study", 0.45),
    ("awakening", 0.60),
    ("team", 0.80),
    ("footer", 0.95),
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let frames = ManualFrames::new();
    let scheduler: Rc<dyn FrameScheduler> = Rc::new(frames.clone());
    let broadcaster = ProgressBroadcaster::new();
    let root = PageRoot::attach(&broadcaster);

    let container = ScrollContainer::mount(
        VirtualPage::new(12_000.0, 1_000.0),
        scheduler,
        broadcaster.clone(),
        SpringConfig::from(&config.scroll),
        InertiaConfig::from(&config.scroll),
    );

    let chart_window = VisibleRange::new(0.40, 0.70);
    let mut revealed = [false; SECTIONS.len()];

    for gesture in 1..=12 {
        container.wheel(1_000.0);
        for _ in 0..45 {
            frames.advance(FRAME_MS);
            for (i, (name, threshold)) in SECTIONS.iter().enumerate() {
                if !revealed[i] && root.is_revealed(RevealGate::new(*threshold)) {
                    revealed[i] = true;
                    info!(section = name, progress = root.progress(), "section revealed");
                }
            }
        }
        let state = container.state();
        info!(
            gesture,
            raw = state.raw_progress,
            smoothed = state.smoothed_progress,
            navbar = root.progress_percent(),
            sphere_opacity = root.sphere_opacity(),
            chart_visible = root.is_visible(chart_window),
            "wheel gesture settled"
        );
    }

    container.unmount();
    info!(frames = frames.fired(), pending = frames.pending(), "replay finished");
    Ok(())
}
