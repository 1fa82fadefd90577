//! Types library for the sliding-window numbers service
//!
//! Shared definitions used by the gateway and by anything that talks to it:
//! the category key, the JSON wire protocol, and the error taxonomy for the
//! upstream number provider.
//!
//! # Modules
//! - `category`: Category key newtype
//! - `wire`: Request/response payloads (gateway response, provider payload, error body)
//! - `errors`: Error taxonomy

pub mod category;
pub mod errors;
pub mod wire;
