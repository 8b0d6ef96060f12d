// Lifecycle operations
// State transitions applied to registry records, keyed by case-insensitive name

use crate::constants::MAX_TOKEN_INCREMENT;
use crate::progress::{elapsed_since, format_duration};
use crate::state::record::{AgentRecord, AgentStatus};
use crate::state::registry::Registry;
use chrono::{DateTime, Utc};

/// Result of a successful [`Registry::complete`]
///
/// Carries the increments rejected by the token anomaly filter so the caller
/// can log them. Zero means the increment was accepted (or was negative and
/// silently ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Completion {
    /// Rejected input token increment
    pub rejected_in: i64,
    /// Rejected output token increment
    pub rejected_out: i64,
}

impl Completion {
    /// Whether any increment was rejected
    pub fn has_rejections(&self) -> bool {
        self.rejected_in != 0 || self.rejected_out != 0
    }
}

impl Registry {
    /// Start (or re-affirm) a run
    ///
    /// A `Running` record whose phase matches `phase` keeps its timer; only a
    /// non-zero `timeout_secs` replaces its budget. Any other call begins a
    /// fresh run. `model` is applied whenever it is non-empty.
    ///
    /// # Returns
    /// * `bool` - false if the agent is unknown or disabled
    pub fn start(&mut self, name: &str, phase: &str, timeout_secs: u64, model: &str) -> bool {
        self.start_at(name, phase, timeout_secs, model, Utc::now())
    }

    pub(crate) fn start_at(
        &mut self,
        name: &str,
        phase: &str,
        timeout_secs: u64,
        model: &str,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(agent) = self.find_enabled_mut(name) else {
            return false;
        };

        let reaffirm = agent.status == AgentStatus::Running && agent.phase == phase;
        agent.status = AgentStatus::Running;
        if reaffirm {
            if timeout_secs > 0 {
                agent.max_timeout_secs = timeout_secs;
            }
            // Running always carries a start time
            if agent.started_at.is_none() {
                agent.started_at = Some(now);
            }
        } else {
            agent.started_at = Some(now);
            agent.phase = phase.to_string();
            agent.max_timeout_secs = timeout_secs;
            agent.time.clear();
            agent.error.clear();
        }

        if !model.is_empty() {
            agent.model = model.to_string();
        }
        true
    }

    /// Set what the agent is doing right now
    /// Returns true if the agent was found and updated
    pub fn update_activity(&mut self, name: &str, icon: &str, activity: &str) -> bool {
        let Some(agent) = self.find_enabled_mut(name) else {
            return false;
        };
        agent.activity_icon = icon.to_string();
        agent.current_activity = activity.to_string();
        true
    }

    /// Mark the current run as done and account its tokens
    ///
    /// Increments above [`MAX_TOKEN_INCREMENT`] are rejected and reported back;
    /// negative increments are ignored.
    ///
    /// # Returns
    /// * `Some(Completion)` - the agent was found; rejected amounts inside
    /// * `None` - the agent is unknown or disabled
    pub fn complete(&mut self, name: &str, tokens_in: i64, tokens_out: i64) -> Option<Completion> {
        self.complete_at(name, tokens_in, tokens_out, Utc::now())
    }

    pub(crate) fn complete_at(
        &mut self,
        name: &str,
        tokens_in: i64,
        tokens_out: i64,
        now: DateTime<Utc>,
    ) -> Option<Completion> {
        let agent = self.find_enabled_mut(name)?;

        let mut completion = Completion::default();
        match accept_tokens(tokens_in) {
            Ok(accepted) => agent.tokens_in = agent.tokens_in.saturating_add(accepted),
            Err(rejected) => completion.rejected_in = rejected,
        }
        match accept_tokens(tokens_out) {
            Ok(accepted) => agent.tokens_out = agent.tokens_out.saturating_add(accepted),
            Err(rejected) => completion.rejected_out = rejected,
        }

        agent.status = AgentStatus::Done;
        agent.clear_activity();
        snapshot_time(agent, now);
        Some(completion)
    }

    /// Mark the current run as failed
    /// Returns true if the agent was found and updated
    pub fn fail(&mut self, name: &str, error_message: &str) -> bool {
        self.fail_at(name, error_message, Utc::now())
    }

    pub(crate) fn fail_at(&mut self, name: &str, error_message: &str, now: DateTime<Utc>) -> bool {
        let Some(agent) = self.find_enabled_mut(name) else {
            return false;
        };
        agent.status = AgentStatus::Error;
        agent.error = error_message.to_string();
        agent.clear_activity();
        snapshot_time(agent, now);
        true
    }

    /// Update the model identifier of an agent
    /// Empty models are ignored; returns true if the agent was found
    pub fn set_model(&mut self, name: &str, model: &str) -> bool {
        let Some(agent) = self.find_enabled_mut(name) else {
            return false;
        };
        if !model.is_empty() {
            agent.model = model.to_string();
        }
        true
    }

    // Disabled records are permanent, so lifecycle operations never see them
    fn find_enabled_mut(&mut self, name: &str) -> Option<&mut AgentRecord> {
        self.find_by_name_mut(name).filter(|agent| agent.is_enabled())
    }
}

/// Apply the anomaly filter to one increment
/// Ok carries the amount to add, Err the rejected amount
fn accept_tokens(increment: i64) -> Result<u64, i64> {
    if increment > MAX_TOKEN_INCREMENT {
        Err(increment)
    } else {
        Ok(u64::try_from(increment).unwrap_or(0))
    }
}

fn snapshot_time(agent: &mut AgentRecord, now: DateTime<Utc>) {
    agent.time = match agent.started_at {
        Some(started) => format_duration(elapsed_since(started, now)),
        None => String::new(),
    };
}
