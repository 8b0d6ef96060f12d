//! End-to-end event sequences through the dispatcher
//!
//! These tests feed realistic event streams into a registry built from
//! configuration and check the resulting records and log output.

use agent_tracker::config::AgentsConfig;
use agent_tracker::dispatcher::dispatch;
use agent_tracker::events::{EventKind, StreamEvent};
use agent_tracker::logging::{LogBuffer, LogLevel};
use agent_tracker::progress::estimate_progress;
use agent_tracker::state::{AgentStatus, Registry};

/// Helper to build the registry used by every scenario
fn create_registry() -> Registry {
    Registry::from_config(&AgentsConfig {
        names: vec!["Claude".to_string(), "Gemini".to_string(), "Codex".to_string()],
        enabled: vec!["claude".to_string(), "gemini".to_string()],
    })
}

fn run(registry: &mut Registry, logs: &mut LogBuffer, events: &[StreamEvent]) {
    for event in events {
        dispatch(registry, event, logs);
    }
}

#[test]
fn test_started_tool_use_completed() {
    let mut registry = create_registry();
    let mut logs = LogBuffer::default();
    run(
        &mut registry,
        &mut logs,
        &[
            StreamEvent::new("x", EventKind::Started, "ignored"),
            StreamEvent::new("claude", EventKind::Started, "planning").with("phase", "plan"),
            StreamEvent::new("claude", EventKind::ToolUse, "reading file"),
        ],
    );

    let claude = registry.find_by_name("claude").unwrap();
    assert_eq!(claude.status, AgentStatus::Running);
    assert_eq!(claude.current_activity, "reading file");
    assert!(estimate_progress(claude.started_at, claude.status) >= 1);

    run(
        &mut registry,
        &mut logs,
        &[StreamEvent::new("claude", EventKind::Completed, "plan ready")
            .with("tokens_in", 100)
            .with("tokens_out", 50)],
    );

    let claude = registry.find_by_name("claude").unwrap();
    assert_eq!(claude.status, AgentStatus::Done);
    assert_eq!(claude.tokens_in, 100);
    assert_eq!(claude.tokens_out, 50);
    assert_eq!(claude.current_activity, "");
    assert_eq!(claude.activity_icon, "");
    assert_eq!(estimate_progress(claude.started_at, claude.status), 100);

    let levels: Vec<LogLevel> = logs.lines().map(|line| line.level).collect();
    assert_eq!(levels, vec![LogLevel::Info, LogLevel::Success]);
}

#[test]
fn test_started_error() {
    let mut registry = create_registry();
    let mut logs = LogBuffer::default();
    run(
        &mut registry,
        &mut logs,
        &[
            StreamEvent::new("gemini", EventKind::Started, ""),
            StreamEvent::new("gemini", EventKind::Thinking, ""),
            StreamEvent::new("gemini", EventKind::Error, "timeout"),
        ],
    );

    let gemini = registry.find_by_name("gemini").unwrap();
    assert_eq!(gemini.status, AgentStatus::Error);
    assert_eq!(gemini.error, "timeout");
    assert_eq!(gemini.current_activity, "");
    assert_eq!(gemini.activity_icon, "");
    assert!(!gemini.time.is_empty());
    assert_eq!(estimate_progress(gemini.started_at, gemini.status), 0);
}

#[test]
fn test_progress_callbacks_do_not_reset_timer() {
    let mut registry = create_registry();
    let mut logs = LogBuffer::default();
    run(
        &mut registry,
        &mut logs,
        &[StreamEvent::new("claude", EventKind::Started, "")
            .with("phase", "analyze")
            .with("timeout_seconds", 600)],
    );
    let first_start = registry.find_by_name("claude").unwrap().started_at;

    run(
        &mut registry,
        &mut logs,
        &[
            StreamEvent::new("claude", EventKind::Progress, "").with("attempt", 1),
            StreamEvent::new("claude", EventKind::Started, "retry").with("phase", "analyze"),
            StreamEvent::new("claude", EventKind::Chunk, "partial"),
        ],
    );
    let claude = registry.find_by_name("claude").unwrap();
    assert_eq!(claude.started_at, first_start);
    assert_eq!(claude.max_timeout_secs, 600);
    assert_eq!(claude.status, AgentStatus::Running);

    run(
        &mut registry,
        &mut logs,
        &[StreamEvent::new("claude", EventKind::Started, "").with("phase", "plan")],
    );
    let claude = registry.find_by_name("claude").unwrap();
    assert_eq!(claude.phase, "plan");
    assert_eq!(claude.max_timeout_secs, 0);
    assert!(claude.started_at >= first_start);
}

#[test]
fn test_duplicate_completed_double_counts() {
    // Idempotency is the sender's contract; the tracker only filters anomalies
    let mut registry = create_registry();
    let completed = StreamEvent::new("claude", EventKind::Completed, "")
        .with("tokens_in", 10)
        .with("tokens_out", 5);
    run(
        &mut registry,
        &mut LogBuffer::default(),
        &[completed.clone(), completed],
    );
    assert_eq!(registry.find_by_name("claude").unwrap().total_tokens(), 30);
}

#[test]
fn test_disabled_agent_never_changes() {
    let mut registry = create_registry();
    let mut logs = LogBuffer::default();
    run(
        &mut registry,
        &mut logs,
        &[
            StreamEvent::new("codex", EventKind::Started, "").with("phase", "plan"),
            StreamEvent::new("codex", EventKind::ToolUse, "reading"),
            StreamEvent::new("codex", EventKind::Completed, "").with("tokens_in", 10),
            StreamEvent::new("codex", EventKind::Error, "boom"),
        ],
    );
    let codex = registry.find_by_name("codex").unwrap();
    assert_eq!(codex.status, AgentStatus::Disabled);
    assert_eq!(codex.total_tokens(), 0);
    assert_eq!(codex.current_activity, "");
    assert!(logs.is_empty());
}

#[test]
fn test_aggregate_after_mixed_runs() {
    let mut registry = create_registry();
    run(
        &mut registry,
        &mut LogBuffer::default(),
        &[
            StreamEvent::new("claude", EventKind::Completed, "")
                .with("tokens_in", 100)
                .with("tokens_out", 200),
            StreamEvent::new("gemini", EventKind::Started, ""),
            StreamEvent::new("gemini", EventKind::Completed, "")
                .with("tokens_in", 100.0)
                .with("tokens_out", 50.0),
            StreamEvent::new("gemini", EventKind::Started, "").with("phase", "review"),
        ],
    );

    let aggregate = registry.aggregate();
    assert_eq!(aggregate.total, 3);
    assert_eq!(aggregate.active, 2);
    assert_eq!(aggregate.total_tokens, 450);
    assert_eq!(aggregate.first_running, "Gemini");
}
