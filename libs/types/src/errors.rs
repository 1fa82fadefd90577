//! Error types for the numbers service
//!
//! Error taxonomy using thiserror

use thiserror::Error;

/// Category key errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category key is empty")]
    Empty,

    #[error("Malformed category key: {key:?}")]
    Malformed { key: String },
}

/// Failures of the upstream number provider.
///
/// Every variant is terminal for the request that triggered it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("No provider endpoint for category {category}")]
    UnknownCategory { category: String },

    #[error("Provider unreachable: {reason}")]
    Unavailable { reason: String },

    #[error("Provider timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Provider responded with status {status}")]
    Status { status: u16 },

    #[error("Provider payload could not be decoded: {reason}")]
    Decode { reason: String },
}

impl ProviderError {
    /// Whether the provider answered at all (as opposed to a transport failure).
    pub fn is_response_error(&self) -> bool {
        matches!(self, ProviderError::Status { .. } | ProviderError::Decode { .. })
    }
}
