// Agent registry
// Ordered collection of agent records, looked up by case-insensitive name

use crate::config::AgentsConfig;
use crate::state::record::{AgentRecord, AgentStatus};
use serde::Serialize;

/// Aggregate view over the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    /// Number of records that are not disabled
    pub active: usize,
    /// Total number of records
    pub total: usize,
    /// Sum of input and output tokens over all records
    pub total_tokens: u64,
    /// Name of the first running record in registry order (empty if none)
    pub first_running: String,
}

/// Registry of all agent records
///
/// Insertion order is the display and iteration order. The registry holds no
/// locking of its own; it is mutated from a single dispatcher loop.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    agents: Vec<AgentRecord>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry for a session
    /// One record per known agent, disabled unless enabled in the config
    pub fn from_config(config: &AgentsConfig) -> Self {
        let mut registry = Self::new();
        for name in &config.names {
            let record = if config.is_enabled(name) {
                AgentRecord::new(name.clone())
            } else {
                AgentRecord::disabled(name.clone())
            };
            registry.add_agent(record);
        }
        registry
    }

    /// Add a record to the registry
    /// Returns true if the record was added (false if the name already exists)
    pub fn add_agent(&mut self, record: AgentRecord) -> bool {
        if self.find_by_name(&record.name).is_some() {
            false
        } else {
            self.agents.push(record);
            true
        }
    }

    /// Find a record by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&AgentRecord> {
        self.agents.iter().find(|agent| agent.matches(name))
    }

    /// Find a record by name for mutation (case-insensitive)
    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut AgentRecord> {
        self.agents.iter_mut().find(|agent| agent.matches(name))
    }

    /// All records in registry order
    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    /// Get the number of records in the registry
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Walk all records once and summarize them
    pub fn aggregate(&self) -> Aggregate {
        let mut aggregate = Aggregate {
            active: 0,
            total: self.agents.len(),
            total_tokens: 0,
            first_running: String::new(),
        };
        for agent in &self.agents {
            if agent.is_enabled() {
                aggregate.active += 1;
            }
            aggregate.total_tokens = aggregate.total_tokens.saturating_add(agent.total_tokens());
            if aggregate.first_running.is_empty() && agent.status == AgentStatus::Running {
                aggregate.first_running = agent.name.clone();
            }
        }
        aggregate
    }

    /// Reset every record for a new session
    pub fn reset_session(&mut self) {
        for agent in &mut self.agents {
            agent.reset();
        }
    }
}
