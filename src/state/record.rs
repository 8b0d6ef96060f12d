// Agent record
// The mutable state unit tracked for one logical agent slot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agent status enumeration
/// Represents the current lifecycle state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Agent is not configured for this session (permanent)
    Disabled,
    /// Agent is configured but has not started a run
    Idle,
    /// Agent is currently running
    Running,
    /// Agent finished its last run successfully
    Done,
    /// Agent's last run failed
    Error,
}

impl AgentStatus {
    /// Get the lowercase label for the status
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Disabled => "disabled",
            AgentStatus::Idle => "idle",
            AgentStatus::Running => "running",
            AgentStatus::Done => "done",
            AgentStatus::Error => "error",
        }
    }
}

/// Agent record
/// Tracks status, timing and token accounting for one agent
///
/// Records are created once per known agent name at session start and are
/// never destroyed, only reset. All mutation goes through the lifecycle
/// operations on [`crate::state::Registry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentRecord {
    /// Stable identifier, case-insensitive for lookups
    pub name: String,
    /// Current lifecycle status
    pub status: AgentStatus,
    /// Input tokens accumulated since the last session reset
    pub tokens_in: u64,
    /// Output tokens accumulated since the last session reset
    pub tokens_out: u64,
    /// When the current run started (None = never started / not timed)
    pub started_at: Option<DateTime<Utc>>,
    /// Elapsed time snapshot taken when the last run finished
    pub time: String,
    /// Label of the current logical stage (e.g. "analyze", "plan")
    pub phase: String,
    /// Time budget of the current run in seconds (0 = no timeout)
    pub max_timeout_secs: u64,
    /// Backend model identifier in use
    pub model: String,
    /// What the agent is doing right now
    pub current_activity: String,
    /// Icon accompanying the current activity
    pub activity_icon: String,
    /// Last failure message (empty unless status is Error)
    pub error: String,
}

impl AgentRecord {
    /// Create an idle record for an agent configured for this session
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_status(name.into(), AgentStatus::Idle)
    }

    /// Create a record for an agent not configured for this session
    pub fn disabled(name: impl Into<String>) -> Self {
        Self::with_status(name.into(), AgentStatus::Disabled)
    }

    fn with_status(name: String, status: AgentStatus) -> Self {
        Self {
            name,
            status,
            tokens_in: 0,
            tokens_out: 0,
            started_at: None,
            time: String::new(),
            phase: String::new(),
            max_timeout_secs: 0,
            model: String::new(),
            current_activity: String::new(),
            activity_icon: String::new(),
            error: String::new(),
        }
    }

    /// Whether the agent is configured for this session
    pub fn is_enabled(&self) -> bool {
        self.status != AgentStatus::Disabled
    }

    /// Sum of input and output tokens
    pub fn total_tokens(&self) -> u64 {
        self.tokens_in.saturating_add(self.tokens_out)
    }

    /// Whether `name` refers to this record (case-insensitive)
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Reset the record for a new session
    /// Disabled records keep their status
    pub fn reset(&mut self) {
        let status = if self.is_enabled() {
            AgentStatus::Idle
        } else {
            AgentStatus::Disabled
        };
        *self = Self::with_status(std::mem::take(&mut self.name), status);
    }

    pub(crate) fn clear_activity(&mut self) {
        self.current_activity.clear();
        self.activity_icon.clear();
    }
}
