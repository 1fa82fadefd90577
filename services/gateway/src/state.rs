use crate::config::GatewayConfig;
use crate::coordinator::RequestCoordinator;
use crate::provider::{HttpNumberProvider, NumberProvider};
use crate::registry::WindowRegistry;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<RequestCoordinator>,
}

impl AppState {
    pub fn new(coordinator: RequestCoordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
        }
    }

    /// Wire the HTTP provider and an empty registry from `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, anyhow::Error> {
        let provider = HttpNumberProvider::new(
            config.endpoints.clone(),
            config.provider_token.clone(),
            config.fetch_timeout,
        )
        .context("Failed to build provider HTTP client")?;

        let provider: Arc<dyn NumberProvider> = Arc::new(provider);
        let coordinator = RequestCoordinator::new(
            Arc::new(WindowRegistry::new()),
            provider,
            config.endpoints.keys().cloned(),
            config.window_capacity,
            config.fetch_timeout,
        );

        Ok(Self::new(coordinator))
    }
}
