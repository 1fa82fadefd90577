//! Gateway configuration
//!
//! Loaded from environment variables so credentials and endpoints stay out of
//! the binary. Every variable is optional; unset variables fall back to the
//! defaults below.
//!
//! - `NUMBERS_LISTEN_ADDR` - socket address to bind (default `0.0.0.0:9876`)
//! - `NUMBERS_WINDOW_CAPACITY` - values retained per category (default 10)
//! - `NUMBERS_PROVIDER_BASE_URL` - base URL for the default categories
//! - `NUMBERS_CATEGORIES` - `key=url` pairs separated by commas, replacing the defaults
//! - `NUMBERS_PROVIDER_TOKEN` - bearer token sent to the provider
//! - `NUMBERS_FETCH_TIMEOUT_MS` - provider request timeout (default 500)

use crate::window::DEFAULT_CAPACITY;
use numbers_types::category::CategoryKey;
use numbers_types::errors::CategoryError;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9876";
pub const DEFAULT_PROVIDER_BASE_URL: &str = "http://20.244.56.144/evaluation-service";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(500);

/// Default categories as (key, path under the provider base URL).
const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("p", "primes"),
    ("f", "fibo"),
    ("e", "even"),
    ("r", "rand"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    #[error("Invalid category in NUMBERS_CATEGORIES: {0}")]
    InvalidCategory(#[from] CategoryError),

    #[error("No categories configured")]
    NoCategories,
}

#[derive(Clone)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub window_capacity: NonZeroUsize,
    /// Category key → provider endpoint URL
    pub endpoints: BTreeMap<CategoryKey, String>,
    pub provider_token: Option<String>,
    pub fetch_timeout: Duration,
}

// Keeps the provider token out of logs
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("listen_addr", &self.listen_addr)
            .field("window_capacity", &self.window_capacity)
            .field("endpoints", &self.endpoints)
            .field("provider_token", &self.provider_token.as_ref().map(|_| "<redacted>"))
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = match lookup("NUMBERS_LISTEN_ADDR") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                var: "NUMBERS_LISTEN_ADDR",
                reason: format!("{raw:?}: {e}"),
            })?,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(|e| ConfigError::InvalidValue {
                    var: "NUMBERS_LISTEN_ADDR",
                    reason: format!("default: {e}"),
                })?,
        };

        let window_capacity = match lookup("NUMBERS_WINDOW_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: "NUMBERS_WINDOW_CAPACITY",
                    reason: format!("{raw:?} is not a positive integer"),
                })?,
            None => DEFAULT_CAPACITY,
        };

        let fetch_timeout = match lookup("NUMBERS_FETCH_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "NUMBERS_FETCH_TIMEOUT_MS",
                        reason: format!("{raw:?} is not a positive number of milliseconds"),
                    });
                }
            },
            None => DEFAULT_FETCH_TIMEOUT,
        };

        let endpoints = match lookup("NUMBERS_CATEGORIES") {
            Some(raw) => parse_categories(&raw)?,
            None => {
                let base = lookup("NUMBERS_PROVIDER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string());
                default_endpoints(&base)?
            }
        };

        if endpoints.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        let provider_token = lookup("NUMBERS_PROVIDER_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            listen_addr,
            window_capacity,
            endpoints,
            provider_token,
            fetch_timeout,
        })
    }
}

/// Endpoints for the four standard categories under `base`.
pub fn default_endpoints(base: &str) -> Result<BTreeMap<CategoryKey, String>, ConfigError> {
    let base = base.trim().trim_end_matches('/');
    let mut endpoints = BTreeMap::new();
    for (key, path) in DEFAULT_CATEGORIES {
        endpoints.insert(CategoryKey::try_new(key)?, format!("{base}/{path}"));
    }
    Ok(endpoints)
}

/// Parse `key=url[,key=url...]`.
fn parse_categories(raw: &str) -> Result<BTreeMap<CategoryKey, String>, ConfigError> {
    let mut endpoints = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, url) = pair.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
            var: "NUMBERS_CATEGORIES",
            reason: format!("expected key=url, got {pair:?}"),
        })?;
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "NUMBERS_CATEGORIES",
                reason: format!("empty URL for category {:?}", key.trim()),
            });
        }
        endpoints.insert(CategoryKey::try_new(key.trim())?, url.to_string());
    }
    Ok(endpoints)
}
