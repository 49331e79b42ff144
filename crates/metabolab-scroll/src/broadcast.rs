//! Observer for smoothed progress values.
//!
//! Single-threaded: listeners live behind `Rc<RefCell<_>>`, and the
//! registry is never borrowed while a listener runs, so listeners may
//! subscribe or unsubscribe from inside a notification.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(f64)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Clone, Default)]
pub struct ProgressBroadcaster {
    registry: Rc<RefCell<Registry>>,
    last: Rc<Cell<Option<f64>>>,
}

impl std::fmt::Debug for ProgressBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBroadcaster")
            .field("listeners", &self.listener_count())
            .field("last", &self.last.get())
            .finish()
    }
}

impl ProgressBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(f64) + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Notify every listener registered at the time of the call.
    pub fn publish(&self, value: f64) {
        self.last.set(Some(value));
        let snapshot: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in snapshot {
            // A listener that re-enters publish() for itself is skipped.
            if let Ok(mut f) = listener.try_borrow_mut() {
                (&mut *f)(value);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last.get()
    }
}

/// Handle returned by [`ProgressBroadcaster::subscribe`].
#[must_use = "dropping a Subscription unsubscribes the listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
