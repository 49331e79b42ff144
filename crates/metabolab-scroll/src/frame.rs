//! Per-frame scheduling seam.
//!
//! Mirrors the host's redraw request API: a callback is requested for the
//! next frame, runs once with the frame timestamp in milliseconds, and must
//! request again to keep a loop going.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

pub type FrameCallback = Box<dyn FnOnce(f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
    fn cancel_frame(&self, handle: FrameHandle);
}

#[derive(Default)]
struct ManualInner {
    now_ms: f64,
    next_id: u64,
    queue: Vec<(FrameHandle, FrameCallback)>,
    in_flight: HashSet<FrameHandle>,
    cancelled: HashSet<FrameHandle>,
    fired: usize,
}

/// Deterministic scheduler: frames only run when [`ManualFrames::advance`]
/// is called. Used by tests and headless replays.
#[derive(Clone, Default)]
pub struct ManualFrames {
    inner: Rc<RefCell<ManualInner>>,
}

impl std::fmt::Debug for ManualFrames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualFrames")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.queue.len())
            .field("fired", &inner.fired)
            .finish()
    }
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `dt_ms` and run every frame requested
    /// before this call. Frames requested while running wait for the next
    /// advance. Returns the number of callbacks that ran.
    pub fn advance(&self, dt_ms: f64) -> usize {
        let (now, due) = {
            let mut inner = self.inner.borrow_mut();
            inner.now_ms += dt_ms;
            let due = std::mem::take(&mut inner.queue);
            inner.in_flight = due.iter().map(|(h, _)| *h).collect();
            (inner.now_ms, due)
        };

        let mut ran = 0;
        for (handle, callback) in due {
            let skip = {
                let mut inner = self.inner.borrow_mut();
                inner.in_flight.remove(&handle);
                inner.cancelled.remove(&handle)
            };
            if skip {
                continue;
            }
            callback(now);
            ran += 1;
        }

        let mut inner = self.inner.borrow_mut();
        inner.cancelled.clear();
        inner.fired += ran;
        ran
    }

    /// Advance `count` frames of `dt_ms` each; returns total callbacks run.
    pub fn run_frames(&self, count: usize, dt_ms: f64) -> usize {
        (0..count).map(|_| self.advance(dt_ms)).sum()
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Total callbacks run since creation.
    pub fn fired(&self) -> usize {
        self.inner.borrow().fired
    }

    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().now_ms
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = FrameHandle(inner.next_id);
        inner.next_id += 1;
        inner.queue.push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.queue.retain(|(h, _)| *h != handle);
        if inner.in_flight.contains(&handle) {
            inner.cancelled.insert(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_callback_runs_once_with_timestamp() {
        let frames = ManualFrames::new();
        let seen = Rc::new(Cell::new(None));
        let s = Rc::clone(&seen);
        frames.request_frame(Box::new(move |t| s.set(Some(t))));
        assert_eq!(frames.advance(16.0), 1);
        assert_eq!(seen.get(), Some(16.0));
        assert_eq!(frames.advance(16.0), 0);
        assert_eq!(frames.fired(), 1);
    }

    #[test]
    fn test_cancelled_frame_never_runs() {
        let frames = ManualFrames::new();
        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        let h = frames.request_frame(Box::new(move |_| r.set(true)));
        frames.cancel_frame(h);
        assert_eq!(frames.pending(), 0);
        frames.advance(16.0);
        assert!(!ran.get());
    }

    #[test]
    fn test_frame_requested_during_frame_waits() {
        let frames = ManualFrames::new();
        let count = Rc::new(Cell::new(0));
        let (f2, c2) = (frames.clone(), Rc::clone(&count));
        frames.request_frame(Box::new(move |_| {
            c2.set(c2.get() + 1);
            let c3 = Rc::clone(&c2);
            f2.request_frame(Box::new(move |_| c3.set(c3.get() + 1)));
        }));
        assert_eq!(frames.advance(16.0), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(frames.pending(), 1);
        frames.advance(16.0);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_cancel_sibling_in_same_frame() {
        let frames = ManualFrames::new();
        let ran = Rc::new(Cell::new(false));
        let victim: Rc<Cell<Option<FrameHandle>>> = Rc::new(Cell::new(None));
        let (f2, v2) = (frames.clone(), Rc::clone(&victim));
        frames.request_frame(Box::new(move |_| {
            if let Some(h) = v2.get() {
                f2.cancel_frame(h);
            }
        }));
        let r = Rc::clone(&ran);
        victim.set(Some(frames.request_frame(Box::new(move |_| r.set(true)))));
        assert_eq!(frames.advance(16.0), 1);
        assert!(!ran.get());
    }
}
