//! Bounded sliding window of integers
//!
//! Keeps the most recent `capacity` values in arrival order. Adding to a full
//! window evicts the oldest value first, one eviction per inserted value.
//!
//! The buffer and its lock live in one type and the raw sequence is never
//! handed out: callers only see `add`, `average`, `snapshot` and `merge`,
//! each of which runs under a single lock acquisition.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of values retained per category.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Result of one atomic merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Contents immediately before the merge.
    pub previous: Vec<i64>,
    /// Contents immediately after the merge.
    pub current: Vec<i64>,
    /// Mean of `current`.
    pub average: f64,
}

#[derive(Debug)]
pub struct SlidingWindow {
    values: Mutex<VecDeque<i64>>,
    capacity: NonZeroUsize,
}

impl SlidingWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            values: Mutex::new(VecDeque::with_capacity(capacity.get())),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Append `values` in order, evicting from the front whenever full.
    pub fn add(&self, values: &[i64]) {
        let mut buffer = self.lock();
        self.push_all(&mut buffer, values);
    }

    /// Arithmetic mean of the current contents, 0 for an empty window.
    pub fn average(&self) -> f64 {
        mean(&self.lock())
    }

    /// Point-in-time copy of the current contents.
    pub fn snapshot(&self) -> Vec<i64> {
        self.lock().iter().copied().collect()
    }

    /// Capture the pre-merge contents, append `values`, then capture the
    /// post-merge contents and mean, all inside one critical section.
    pub fn merge(&self, values: &[i64]) -> MergeOutcome {
        let mut buffer = self.lock();
        let previous: Vec<i64> = buffer.iter().copied().collect();
        self.push_all(&mut buffer, values);

        MergeOutcome {
            previous,
            current: buffer.iter().copied().collect(),
            average: mean(&buffer),
        }
    }

    fn push_all(&self, buffer: &mut VecDeque<i64>, values: &[i64]) {
        // Only the last `capacity` inputs can survive the merge.
        let skip = values.len().saturating_sub(self.capacity.get());
        for &value in &values[skip..] {
            if buffer.len() == self.capacity.get() {
                buffer.pop_front();
            }
            buffer.push_back(value);
        }
    }

    // `push_all` cannot panic midway, so a poisoned buffer is still consistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<i64>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Exact integer sum, promoted to floating point only for the division.
fn mean(values: &VecDeque<i64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
    sum as f64 / values.len() as f64
}
