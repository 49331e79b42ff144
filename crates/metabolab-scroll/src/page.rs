//! Page-root consumer of smoothed progress.
//!
//! The page root keeps the latest progress as its single source of truth;
//! sections ask it whether they should be showing.

use std::cell::Cell;
use std::rc::Rc;

use crate::broadcast::{ProgressBroadcaster, Subscription};

/// "Become visible once progress exceeds `threshold`."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealGate {
    pub threshold: f64,
}

impl RevealGate {
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn is_revealed(&self, progress: f64) -> bool {
        progress > self.threshold
    }
}

/// Visible while progress lies in `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub start: f64,
    pub end: f64,
}

impl VisibleRange {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, progress: f64) -> bool {
        (self.start..=self.end).contains(&progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Opacity of the background sphere, brightening as the reader scrolls.
    pub fn sphere_opacity(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Theme::Dark => 0.6 + p * 0.4,
            Theme::Light => 0.8 + p * 0.2,
        }
    }
}

/// Width of the navbar progress indicator, in whole percent.
pub fn progress_percent(progress: f64) -> u8 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u8
}

pub struct PageRoot {
    progress: Rc<Cell<f64>>,
    theme: Cell<Theme>,
    _subscription: Subscription,
}

impl std::fmt::Debug for PageRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRoot")
            .field("progress", &self.progress.get())
            .field("theme", &self.theme.get())
            .finish()
    }
}

impl PageRoot {
    pub fn attach(broadcaster: &ProgressBroadcaster) -> Self {
        let progress = Rc::new(Cell::new(broadcaster.last_value().unwrap_or(0.0)));
        let sink = Rc::clone(&progress);
        let subscription = broadcaster.subscribe(move |value| sink.set(value));
        Self {
            progress,
            theme: Cell::new(Theme::default()),
            _subscription: subscription,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    pub fn is_revealed(&self, gate: RevealGate) -> bool {
        gate.is_revealed(self.progress())
    }

    pub fn is_visible(&self, range: VisibleRange) -> bool {
        range.contains(self.progress())
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme.get().toggle();
        self.theme.set(next);
        next
    }

    pub fn sphere_opacity(&self) -> f64 {
        self.theme().sphere_opacity(self.progress())
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.progress())
    }
}
