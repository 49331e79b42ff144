//! metabolab-scroll — Scroll-driven animation orchestration.
//!
//! Turns the scroll position of the page container into a spring-smoothed
//! 0..1 progress value and hands it to whoever subscribed:
//!   - `spring`    — damped spring filter
//!   - `broadcast` — subscribe/unsubscribe observer for progress values
//!   - `frame`     — per-frame scheduling seam (host redraw requests)
//!   - `inertia`   — eased page scrolling for wheel input
//!   - `container` — the mounted wrapper that ties the above together
//!   - `page`      — page-root consumer: gates, theme, chart visibility

pub mod spring;
pub mod broadcast;
pub mod frame;
pub mod inertia;
pub mod container;
pub mod page;

pub use spring::{Spring, SpringConfig};
pub use broadcast::{ProgressBroadcaster, Subscription};
pub use frame::{FrameCallback, FrameHandle, FrameScheduler, ManualFrames};
pub use inertia::{InertiaConfig, InertialScroller};
pub use container::{ScrollContainer, ScrollMetrics, ScrollState, ScrollSurface, VirtualPage};
pub use page::{PageRoot, RevealGate, Theme, VisibleRange};
