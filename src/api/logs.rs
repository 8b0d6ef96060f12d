//! Log buffer handler

use crate::logging::LogLine;
use crate::service::ServiceState;
use axum::{extract::State, response::Json};
use serde::Serialize;

/// Logs response
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    /// Buffered dispatcher lines, oldest first
    pub lines: Vec<LogLine>,
    /// Number of lines returned
    pub count: usize,
}

/// GET /api/logs - Recent dispatcher log lines
pub async fn list_logs(State(service): State<ServiceState>) -> Json<LogsResponse> {
    let state = service.app.read().await;
    let lines: Vec<LogLine> = state.logs.lines().cloned().collect();
    let count = lines.len();
    Json(LogsResponse { lines, count })
}
