//! Category → window registry
//!
//! Windows are created lazily on first use and never removed; the registry
//! grows by one entry per distinct category ever merged into.

use crate::window::SlidingWindow;
use dashmap::DashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub struct WindowRegistry {
    // Maps category key to its window
    windows: DashMap<String, Arc<SlidingWindow>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Return the window for `key`, creating an empty one with `capacity` if
    /// none exists. Racing callers for the same unseen key all receive the
    /// single instance that won the shard lock.
    pub fn get_or_create(&self, key: &str, capacity: NonZeroUsize) -> Arc<SlidingWindow> {
        if let Some(existing) = self.windows.get(key) {
            return Arc::clone(existing.value());
        }

        let entry = self.windows.entry(key.to_string()).or_insert_with(|| {
            tracing::debug!(category = key, capacity = capacity.get(), "Creating window");
            Arc::new(SlidingWindow::new(capacity))
        });
        Arc::clone(entry.value())
    }

    /// Lookup without creation.
    pub fn get(&self, key: &str) -> Option<Arc<SlidingWindow>> {
        self.windows.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::DEFAULT_CAPACITY;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_get_or_create_reuses_window() {
        let registry = WindowRegistry::new();
        let first = registry.get_or_create("p", DEFAULT_CAPACITY);
        first.add(&[2, 3]);

        let second = registry.get_or_create("p", DEFAULT_CAPACITY);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.snapshot(), vec![2, 3]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_existing_window_keeps_original_capacity() {
        let registry = WindowRegistry::new();
        registry.get_or_create("e", NonZeroUsize::new(3).unwrap());
        let again = registry.get_or_create("e", NonZeroUsize::new(50).unwrap());
        assert_eq!(again.capacity(), 3);
    }

    #[test]
    fn test_categories_are_independent() {
        let registry = WindowRegistry::new();
        registry.get_or_create("p", DEFAULT_CAPACITY).add(&[2, 3, 5]);
        registry.get_or_create("f", DEFAULT_CAPACITY).add(&[0, 1, 1]);

        assert_eq!(registry.get("p").unwrap().snapshot(), vec![2, 3, 5]);
        assert_eq!(registry.get("f").unwrap().snapshot(), vec![0, 1, 1]);
        assert!(registry.get("r").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_first_access_creates_one_window() {
        let registry = Arc::new(WindowRegistry::new());
        let num_threads = 16;

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let window = registry.get_or_create("r", DEFAULT_CAPACITY);
                    window.add(&[1]);
                    Arc::as_ptr(&window) as usize
                })
            })
            .collect();

        let pointers: HashSet<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(pointers.len(), 1, "All racers must share one window");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("r").unwrap().len(), 10);
    }
}
