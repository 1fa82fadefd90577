//! Sliding-window numbers gateway
//!
//! `GET /numbers/{category}` fetches a batch of integers from the configured
//! provider, merges it into that category's bounded window, and answers with
//! the window before and after the merge plus the current mean.
//!
//! # Modules
//! - `window`: bounded FIFO window with atomic merge
//! - `registry`: lazily populated category → window map
//! - `provider`: upstream number source (trait + HTTP implementation)
//! - `coordinator`: fetch → merge → respond for one request
//! - `config`, `state`, `router`, `handlers`, `error`, `telemetry`: service plumbing

pub mod config;
pub mod coordinator;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod registry;
pub mod router;
pub mod state;
pub mod telemetry;
pub mod window;
