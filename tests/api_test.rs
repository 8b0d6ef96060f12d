//! Integration tests for the HTTP handlers
//!
//! Handlers are called directly with extractors built by hand; events go
//! through the real dispatcher task.

use agent_tracker::api::agents::{get_agent, list_agents, summary};
use agent_tracker::api::events::{post_event, reset_session};
use agent_tracker::api::logs::list_logs;
use agent_tracker::error::AppError;
use agent_tracker::events::{EventKind, StreamEvent};
use agent_tracker::service::ServiceState;
use agent_tracker::state::{AgentRecord, AgentStatus, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Helper to create a service with two enabled agents and one disabled
fn create_service() -> (ServiceState, JoinHandle<()>) {
    let mut state = AppState::new();
    state.registry.add_agent(AgentRecord::new("Claude"));
    state.registry.add_agent(AgentRecord::new("Gemini"));
    state.registry.add_agent(AgentRecord::disabled("Codex"));
    ServiceState::start(Arc::new(RwLock::new(state)), 16)
}

/// Drop every queue handle and wait until the dispatcher has drained
async fn drain(service: ServiceState, handle: JoinHandle<()>) -> Arc<RwLock<AppState>> {
    let app = service.app.clone();
    drop(service);
    handle.await.unwrap();
    app
}

#[tokio::test]
async fn test_post_events_and_read_back() {
    let (service, handle) = create_service();

    let events = [
        StreamEvent::new("claude", EventKind::Started, "planning")
            .with("phase", "plan")
            .with("timeout_seconds", 300),
        StreamEvent::new("claude", EventKind::ToolUse, "reading file"),
        StreamEvent::new("gemini", EventKind::Started, ""),
    ];
    for event in events {
        let (status, body) = post_event(State(service.clone()), Json(event))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body.0.status, "ok");
    }

    let app = drain(service, handle).await;
    let (service, _handle) = ServiceState::start(app, 4);

    let Json(list) = list_agents(State(service.clone())).await;
    assert_eq!(list.count, 3);
    let claude = &list.agents[0];
    assert_eq!(claude.name, "Claude");
    assert_eq!(claude.status, AgentStatus::Running);
    assert_eq!(claude.current_activity, "reading file");
    assert!(claude.progress >= 1 && claude.progress <= 95);
    assert!(claude.elapsed.trim_end().ends_with("/5m"));

    let Json(codex) = get_agent(State(service.clone()), Path("CODEX".to_string()))
        .await
        .unwrap();
    assert_eq!(codex.status, AgentStatus::Disabled);
    assert_eq!(codex.progress, 0);
    assert_eq!(codex.elapsed, "");

    let Json(aggregate) = summary(State(service.clone())).await;
    assert_eq!(aggregate.total, 3);
    assert_eq!(aggregate.active, 2);
    assert_eq!(aggregate.first_running, "Claude");

    let Json(logs) = list_logs(State(service)).await;
    assert_eq!(logs.count, 1);
    assert_eq!(logs.lines[0].message, "[plan] planning []");
}

#[tokio::test]
async fn test_get_unknown_agent() {
    let (service, _handle) = create_service();
    let result = get_agent(State(service), Path("gpt".to_string())).await;
    assert!(matches!(result, Err(AppError::AgentNotFound(name)) if name == "gpt"));
}

#[tokio::test]
async fn test_reset_session_endpoint() {
    let (service, handle) = create_service();

    let event = StreamEvent::new("claude", EventKind::Completed, "ok")
        .with("tokens_in", 100)
        .with("tokens_out", 50);
    post_event(State(service.clone()), Json(event)).await.unwrap();
    let (status, _) = reset_session(State(service.clone())).await.unwrap();
    assert_eq!(status, StatusCode::ACCEPTED);

    let app = drain(service, handle).await;
    let state = app.read().await;
    assert_eq!(state.registry.aggregate().total_tokens, 0);
    assert!(state.logs.is_empty());
    assert_eq!(
        state.registry.find_by_name("claude").unwrap().status,
        AgentStatus::Idle
    );
}

#[tokio::test]
async fn test_post_event_after_dispatcher_stopped() {
    let (service, handle) = create_service();
    handle.abort();
    let _ = handle.await;

    let result = post_event(
        State(service),
        Json(StreamEvent::new("claude", EventKind::Thinking, "")),
    )
    .await;
    assert!(matches!(result, Err(AppError::QueueClosed)));
}

#[tokio::test]
async fn test_finished_agents_report_no_running_elapsed() {
    let (service, handle) = create_service();

    let events = [
        StreamEvent::new("claude", EventKind::Started, "").with("timeout_seconds", 90),
        StreamEvent::new("claude", EventKind::Completed, "ok").with("tokens_in", 10),
        StreamEvent::new("gemini", EventKind::Started, "").with("timeout_seconds", 90),
        StreamEvent::new("gemini", EventKind::Error, "boom"),
    ];
    for event in events {
        post_event(State(service.clone()), Json(event)).await.unwrap();
    }

    let app = drain(service, handle).await;
    let (service, _handle) = ServiceState::start(app, 4);

    let Json(list) = list_agents(State(service)).await;
    for agent in &list.agents[..2] {
        assert_ne!(agent.status, AgentStatus::Running);
        assert!(agent.started_at.is_some());
        assert_eq!(agent.elapsed, "");
        assert!(!agent.time.is_empty());
    }
}
