//! Bounded, append-only sample history.

use std::collections::VecDeque;

use crate::sample::SamplePoint;

/// Generation-ordered points; the oldest are evicted once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    points: VecDeque<SamplePoint>,
    capacity: usize,
}

impl SampleHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append, then trim from the front until the cap holds.
    /// Returns how many points were evicted.
    pub fn append_and_trim(&mut self, point: SamplePoint) -> usize {
        self.points.push_back(point);
        let mut evicted = 0;
        while self.points.len() > self.capacity {
            self.points.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// The last `n` points, oldest first.
    pub fn latest(&self, n: usize) -> Vec<SamplePoint> {
        let skip = self.points.len().saturating_sub(n);
        self.points.iter().skip(skip).cloned().collect()
    }

    pub fn snapshot(&self) -> Vec<SamplePoint> {
        self.points.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SamplePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
