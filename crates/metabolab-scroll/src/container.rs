//! The mounted scroll wrapper.
//!
//! Owns a per-frame loop that, on every frame:
//!   1. advances the inertial scroller and pushes its offset to the surface,
//!   2. reads raw progress from the surface,
//!   3. retargets and steps the spring,
//!   4. publishes the smoothed value if it moved.
//!
//! Unmounting (explicitly or by drop) cancels the pending frame; no frame
//! callback runs after teardown.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::broadcast::ProgressBroadcaster;
use crate::frame::{FrameHandle, FrameScheduler};
use crate::inertia::{InertiaConfig, InertialScroller};
use crate::spring::{Spring, SpringConfig};

/// Frame deltas above this are treated as this long (backgrounded tabs, breakpoints).
const MAX_FRAME_DELTA_SECS: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn max_offset(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Completion fraction from "top at top" to "bottom at bottom".
    /// A container that cannot scroll reports 0.
    pub fn progress(&self) -> f64 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 0.0;
        }
        (self.offset / max).clamp(0.0, 1.0)
    }
}

/// The host's scrollable region.
pub trait ScrollSurface {
    fn metrics(&self) -> ScrollMetrics;
    fn scroll_to(&mut self, offset: f64);
}

/// In-memory surface for headless runs.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualPage {
    metrics: ScrollMetrics,
}

impl VirtualPage {
    pub fn new(scroll_height: f64, client_height: f64) -> Self {
        Self {
            metrics: ScrollMetrics { offset: 0.0, scroll_height, client_height },
        }
    }

    pub fn offset(&self) -> f64 {
        self.metrics.offset
    }
}

impl ScrollSurface for VirtualPage {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn scroll_to(&mut self, offset: f64) {
        self.metrics.offset = offset.clamp(0.0, self.metrics.max_offset());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub raw_progress: f64,
    pub smoothed_progress: f64,
}

struct Inner<S> {
    surface: S,
    spring: Spring,
    scroller: InertialScroller,
    state: ScrollState,
    last_frame_ms: Option<f64>,
    pending: Option<FrameHandle>,
    mounted: bool,
}

impl<S: ScrollSurface> Inner<S> {
    /// Returns the smoothed value if it changed this frame.
    fn on_frame(&mut self, now_ms: f64) -> Option<f64> {
        let dt = match self.last_frame_ms {
            Some(prev) => ((now_ms - prev) / 1000.0).clamp(0.0, MAX_FRAME_DELTA_SECS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        let metrics = self.surface.metrics();
        self.scroller.set_limit(metrics.max_offset());
        self.scroller.sync_position(metrics.offset);
        if let Some(offset) = self.scroller.raf(now_ms) {
            self.surface.scroll_to(offset);
        }

        let raw = self.surface.metrics().progress();
        self.state.raw_progress = raw;

        let before = self.spring.value();
        self.spring.set_target(raw);
        let after = self.spring.step(dt);
        self.state.smoothed_progress = after;

        (after != before).then_some(after)
    }
}

pub struct ScrollContainer<S: ScrollSurface + 'static> {
    inner: Rc<RefCell<Inner<S>>>,
    scheduler: Rc<dyn FrameScheduler>,
    broadcaster: ProgressBroadcaster,
}

impl<S: ScrollSurface + 'static> std::fmt::Debug for ScrollContainer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollContainer")
            .field("state", &inner.state)
            .field("mounted", &inner.mounted)
            .finish()
    }
}

impl<S: ScrollSurface + 'static> ScrollContainer<S> {
    /// Mount over `surface` and start the frame loop. Smoothed progress is
    /// published on `broadcaster` whenever it changes.
    pub fn mount(
        surface: S,
        scheduler: Rc<dyn FrameScheduler>,
        broadcaster: ProgressBroadcaster,
        spring: SpringConfig,
        inertia: InertiaConfig,
    ) -> Self {
        let metrics = surface.metrics();
        let raw = metrics.progress();
        let inner = Rc::new(RefCell::new(Inner {
            surface,
            spring: Spring::new(raw, spring),
            scroller: InertialScroller::new(inertia, metrics.offset, metrics.max_offset()),
            state: ScrollState { raw_progress: raw, smoothed_progress: raw },
            last_frame_ms: None,
            pending: None,
            mounted: true,
        }));

        schedule_frame(&inner, &scheduler, &broadcaster);
        debug!(raw, "scroll container mounted");

        Self { inner, scheduler, broadcaster }
    }

    /// Feed wheel input to the inertial scroller.
    pub fn wheel(&self, delta: f64) {
        self.inner.borrow_mut().scroller.wheel(delta);
    }

    pub fn scroll_to(&self, offset: f64) {
        self.inner.borrow_mut().scroller.scroll_to(offset);
    }

    pub fn state(&self) -> ScrollState {
        self.inner.borrow().state
    }

    /// Direct access to the surface, e.g. to mimic the host scrolling natively.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.borrow_mut().surface)
    }

    pub fn broadcaster(&self) -> &ProgressBroadcaster {
        &self.broadcaster
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().mounted
    }

    /// Stop the frame loop and the inertial scroller. Idempotent.
    pub fn unmount(&self) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if !inner.mounted {
                return;
            }
            inner.mounted = false;
            inner.scroller.destroy();
            inner.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel_frame(handle);
        }
        debug!("scroll container unmounted");
    }
}

impl<S: ScrollSurface + 'static> Drop for ScrollContainer<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn schedule_frame<S: ScrollSurface + 'static>(
    inner: &Rc<RefCell<Inner<S>>>,
    scheduler: &Rc<dyn FrameScheduler>,
    broadcaster: &ProgressBroadcaster,
) {
    let weak = Rc::downgrade(inner);
    let next_scheduler = Rc::clone(scheduler);
    let next_broadcaster = broadcaster.clone();

    let handle = scheduler.request_frame(Box::new(move |now_ms| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let changed = {
            let mut guard = inner.borrow_mut();
            if !guard.mounted {
                return;
            }
            guard.pending = None;
            guard.on_frame(now_ms)
        };
        if let Some(value) = changed {
            next_broadcaster.publish(value);
        }
        // A listener may have unmounted the container during publish.
        let mounted = inner.borrow().mounted;
        if mounted {
            schedule_frame(&inner, &next_scheduler, &next_broadcaster);
        }
    }));

    inner.borrow_mut().pending = Some(handle);
}
