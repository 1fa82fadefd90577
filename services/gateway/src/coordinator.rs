//! Request coordination
//!
//! One call to [`RequestCoordinator::handle`] serves one `GET /numbers/{category}`:
//!
//! 1. validate the category against the configured set
//! 2. fetch from the provider (no lock held, bounded by `fetch_timeout`)
//! 3. resolve the category's window, creating it on first use
//! 4. merge under the window's lock, capturing the true pre-merge snapshot
//!
//! A failed fetch returns before step 3, so the window is never touched and
//! an unknown category never allocates one.

use crate::error::AppError;
use crate::provider::NumberProvider;
use crate::registry::WindowRegistry;
use numbers_types::category::CategoryKey;
use numbers_types::errors::ProviderError;
use numbers_types::wire::NumbersResponse;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

pub struct RequestCoordinator {
    registry: Arc<WindowRegistry>,
    provider: Arc<dyn NumberProvider>,
    categories: BTreeSet<CategoryKey>,
    capacity: NonZeroUsize,
    fetch_timeout: Duration,
}

impl RequestCoordinator {
    pub fn new(
        registry: Arc<WindowRegistry>,
        provider: Arc<dyn NumberProvider>,
        categories: impl IntoIterator<Item = CategoryKey>,
        capacity: NonZeroUsize,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            provider,
            categories: categories.into_iter().collect(),
            capacity,
            fetch_timeout,
        }
    }

    pub fn registry(&self) -> &Arc<WindowRegistry> {
        &self.registry
    }

    /// Resolve `raw` to a configured category.
    fn resolve(&self, raw: &str) -> Result<CategoryKey, AppError> {
        CategoryKey::try_new(raw)
            .ok()
            .filter(|key| self.categories.contains(key))
            .ok_or_else(|| AppError::UnknownCategory(raw.to_string()))
    }

    pub async fn handle(&self, raw_category: &str) -> Result<NumbersResponse, AppError> {
        let category = self.resolve(raw_category)?;

        let fetched = tokio::time::timeout(self.fetch_timeout, self.provider.fetch(&category))
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::Timeout {
                    timeout_ms: self.fetch_timeout.as_millis() as u64,
                })
            });

        let numbers = fetched.map_err(|err| {
            tracing::warn!(%category, error = %err, "Fetch failed, window left untouched");
            AppError::from(err)
        })?;

        let window = self.registry.get_or_create(category.as_str(), self.capacity);
        let outcome = window.merge(&numbers);

        tracing::info!(
            %category,
            fetched = numbers.len(),
            window_len = outcome.current.len(),
            avg = outcome.average,
            "Merged numbers"
        );

        Ok(NumbersResponse {
            window_prev_state: outcome.previous,
            window_curr_state: outcome.current,
            numbers,
            avg: outcome.average,
        })
    }
}
