//! Eased page scrolling.
//!
//! Wheel input does not jump the page; it retargets an animation that
//! eases the scroll offset toward the new position over a fixed duration.
//! Progress smoothing never reads from here; the two only meet through
//! the page's scroll offset.

use metabolab_config::ScrollSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaConfig {
    pub duration_secs: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self { duration_secs: 1.2 }
    }
}

impl From<&ScrollSettings> for InertiaConfig {
    fn from(s: &ScrollSettings) -> Self {
        Self { duration_secs: s.inertia_duration_secs }
    }
}

/// Exponential ease-out, capped at 1.
pub fn ease_out_expo(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f64,
    to: f64,
    started_ms: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct InertialScroller {
    config: InertiaConfig,
    position: f64,
    limit: f64,
    animation: Option<Animation>,
    destroyed: bool,
}

impl InertialScroller {
    /// `limit` is the largest reachable offset.
    pub fn new(config: InertiaConfig, position: f64, limit: f64) -> Self {
        let limit = limit.max(0.0);
        Self {
            config,
            position: position.clamp(0.0, limit),
            limit,
            animation: None,
            destroyed: false,
        }
    }

    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.position = self.position.clamp(0.0, self.limit);
        if let Some(anim) = self.animation.as_mut() {
            anim.to = anim.to.clamp(0.0, self.limit);
        }
    }

    /// Follow an offset the host moved on its own (keyboard, scrollbar drag).
    /// Ignored while an animation owns the position.
    pub fn sync_position(&mut self, offset: f64) {
        if self.animation.is_none() {
            self.position = offset.clamp(0.0, self.limit);
        }
    }

    /// Scroll by `delta` relative to wherever the page is heading.
    pub fn wheel(&mut self, delta: f64) {
        let heading = self.animation.map(|a| a.to).unwrap_or(self.position);
        self.scroll_to(heading + delta);
    }

    pub fn scroll_to(&mut self, target: f64) {
        if self.destroyed {
            return;
        }
        let to = target.clamp(0.0, self.limit);
        if to == self.position {
            self.animation = None;
            return;
        }
        self.animation = Some(Animation {
            from: self.position,
            to,
            started_ms: None,
        });
    }

    /// Per-frame update. Returns the new offset while an animation runs.
    pub fn raf(&mut self, now_ms: f64) -> Option<f64> {
        if self.destroyed {
            return None;
        }
        let anim = self.animation.as_mut()?;
        let started = *anim.started_ms.get_or_insert(now_ms);

        let duration_ms = (self.config.duration_secs * 1000.0).max(f64::EPSILON);
        let t = ((now_ms - started) / duration_ms).clamp(0.0, 1.0);

        if t >= 1.0 {
            self.position = anim.to;
            self.animation = None;
        } else {
            self.position = anim.from + (anim.to - anim.from) * ease_out_expo(t);
        }
        Some(self.position)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn destroy(&mut self) {
        self.animation = None;
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
