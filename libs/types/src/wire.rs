//! JSON wire protocol
//!
//! Field names follow the public contract (`windowPrevState`, `windowCurrState`,
//! `numbers`, `avg`) rather than Rust naming.

use serde::{Deserialize, Serialize};

/// Successful response of `GET /numbers/{category}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumbersResponse {
    /// Window contents before this request's merge.
    pub window_prev_state: Vec<i64>,
    /// Window contents after this request's merge.
    pub window_curr_state: Vec<i64>,
    /// Values fetched from the provider for this request.
    pub numbers: Vec<i64>,
    /// Arithmetic mean of `window_curr_state`, 0 when empty.
    pub avg: f64,
}

/// Payload returned by the upstream number provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPayload {
    pub numbers: Vec<i64>,
}

/// Error body returned by the gateway for any non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `UNKNOWN_CATEGORY`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}
