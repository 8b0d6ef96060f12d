//! Stream events
//!
//! Tagged progress notifications emitted by the orchestration engine for each
//! agent. Payload fields live in an untyped `data` map whose numeric encoding
//! depends on the sender; see [`payload`] for the tolerant accessors.

pub mod payload;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of a stream event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A run (or phase) started
    Started,
    /// The agent is using a tool
    ToolUse,
    /// The model is thinking
    Thinking,
    /// A chunk of streamed output
    Chunk,
    /// Progress report, possibly a retry
    Progress,
    /// The run completed
    Completed,
    /// The run failed
    Error,
    /// Any kind this tracker does not know about
    #[serde(other)]
    Unknown,
}

/// One stream event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Name of the agent the event is about
    pub agent: String,
    /// What happened
    pub kind: EventKind,
    /// Free-form message
    #[serde(default)]
    pub message: String,
    /// Side table of named fields of unknown concrete type
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl StreamEvent {
    /// Create an event without payload fields
    pub fn new(agent: impl Into<String>, kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            kind,
            message: message.into(),
            data: Map::new(),
        }
    }

    /// Add a payload field
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}
