//! Event intake handlers
//!
//! Requests only enqueue work; the dispatcher task applies it.

use crate::error::AppError;
use crate::events::StreamEvent;
use crate::service::ServiceState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator (e.g., "ok", "error")
    pub status: String,
}

/// POST /api/events - Queue one stream event
pub async fn post_event(
    State(service): State<ServiceState>,
    Json(event): Json<StreamEvent>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let agent = event.agent.clone();
    service.events.submit(event).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: format!("Event for {} queued", agent),
            status: "ok".to_string(),
        }),
    ))
}

/// POST /api/session/reset - Queue a session reset
pub async fn reset_session(
    State(service): State<ServiceState>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    service.events.reset_session().await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "Session reset queued".to_string(),
            status: "ok".to_string(),
        }),
    ))
}
