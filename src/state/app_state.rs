// Application state
// Contains the agent registry and the buffer of recent dispatcher log lines

use crate::config::Config;
use crate::dispatcher::dispatch;
use crate::events::StreamEvent;
use crate::logging::{LogBuffer, Tee, TracingSink};
use crate::state::registry::Registry;

/// Main application state
///
/// Shared behind one coarse lock: the registry is scanned by name, so
/// per-record locking would buy nothing at single-digit agent counts.
pub struct AppState {
    /// Registry of all agents, in display order
    pub registry: Registry,
    /// Recent dispatcher log lines
    pub logs: LogBuffer,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            logs: LogBuffer::default(),
        }
    }
}

impl AppState {
    /// Create an empty application state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the state for a session from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            registry: Registry::from_config(&config.agents),
            logs: LogBuffer::new(config.logging.buffer_lines),
        }
    }

    /// Apply one event, logging to `tracing` and the log buffer
    pub fn apply_event(&mut self, event: &StreamEvent) {
        let mut sink = Tee::new(TracingSink, &mut self.logs);
        dispatch(&mut self.registry, event, &mut sink);
    }

    /// Start a new session: reset every record and clear the log buffer
    pub fn reset_session(&mut self) {
        self.registry.reset_session();
        self.logs.clear();
    }
}
