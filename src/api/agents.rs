//! Agent read API handlers
//!
//! Read-only views over the registry for the presentation layer. Derived
//! values (progress, elapsed) are computed per request, never stored.

use crate::error::AppError;
use crate::progress::{estimate_progress, format_elapsed};
use crate::service::ServiceState;
use crate::state::{Aggregate, AgentRecord, AgentStatus};
use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Agent response type
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    /// Name of the agent
    pub name: String,
    /// Current status of the agent
    pub status: AgentStatus,
    /// Current phase label
    pub phase: String,
    /// Model in use
    pub model: String,
    /// Input tokens accumulated this session
    pub tokens_in: u64,
    /// Output tokens accumulated this session
    pub tokens_out: u64,
    /// Start of the current run
    pub started_at: Option<DateTime<Utc>>,
    /// Elapsed snapshot of the last finished run
    pub time: String,
    /// Time budget of the current run in seconds (0 = none)
    pub max_timeout_secs: u64,
    /// Icon for the current activity
    pub activity_icon: String,
    /// Current activity
    pub current_activity: String,
    /// Last failure message
    pub error: String,
    /// Estimated progress (0-100)
    pub progress: u8,
    /// Elapsed/timeout display string, empty unless running
    pub elapsed: String,
}

impl From<&AgentRecord> for AgentResponse {
    fn from(agent: &AgentRecord) -> Self {
        Self {
            name: agent.name.clone(),
            status: agent.status,
            phase: agent.phase.clone(),
            model: agent.model.clone(),
            tokens_in: agent.tokens_in,
            tokens_out: agent.tokens_out,
            started_at: agent.started_at,
            time: agent.time.clone(),
            max_timeout_secs: agent.max_timeout_secs,
            activity_icon: agent.activity_icon.clone(),
            current_activity: agent.current_activity.clone(),
            error: agent.error.clone(),
            progress: estimate_progress(agent.started_at, agent.status),
            // Finished runs report their frozen `time` instead
            elapsed: match agent.status {
                AgentStatus::Running => format_elapsed(agent.started_at, agent.max_timeout_secs),
                _ => String::new(),
            },
        }
    }
}

/// Agents list response
#[derive(Debug, Serialize)]
pub struct AgentsListResponse {
    /// All agents in registry order
    pub agents: Vec<AgentResponse>,
    /// Total number of agents
    pub count: usize,
}

/// GET /api/agents - List all agents
pub async fn list_agents(State(service): State<ServiceState>) -> Json<AgentsListResponse> {
    let state = service.app.read().await;
    let agents: Vec<AgentResponse> = state
        .registry
        .agents()
        .iter()
        .map(AgentResponse::from)
        .collect();
    let count = agents.len();
    Json(AgentsListResponse { agents, count })
}

/// GET /api/agents/:name - Get one agent by name (case-insensitive)
pub async fn get_agent(
    State(service): State<ServiceState>,
    Path(name): Path<String>,
) -> Result<Json<AgentResponse>, AppError> {
    let state = service.app.read().await;
    state
        .registry
        .find_by_name(&name)
        .map(|agent| Json(AgentResponse::from(agent)))
        .ok_or(AppError::AgentNotFound(name))
}

/// GET /api/summary - Aggregate over all agents
pub async fn summary(State(service): State<ServiceState>) -> Json<Aggregate> {
    let state = service.app.read().await;
    Json(state.registry.aggregate())
}
