//! Agent Tracker Library
//!
//! Authoritative in-process state for concurrently running agent backends,
//! driven by a stream of tagged progress events. The main binary in
//! `src/main.rs` hosts it behind an HTTP API.

pub mod api;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod error;
/// Stream event types and payload accessors
pub mod events;
pub mod logging;
pub mod progress;
pub mod service;
/// Agent records, registry, and lifecycle operations
///
/// Handles the ordered agent registry and the state transitions applied to it.
pub mod state;
