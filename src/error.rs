//! Error types and error handling for the application
//!
//! The tracking core never fails; these errors belong to the service around
//! it. All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Agent with the given name was not found
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The dispatcher task is no longer accepting events
    #[error("Event queue closed")]
    QueueClosed,

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            AppError::QueueClosed => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let response = AppError::AgentNotFound("claude".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::QueueClosed.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AppError::AgentNotFound("claude".to_string()).to_string(),
            "Agent not found: claude"
        );
        assert_eq!(
            AppError::InvalidConfig("bad".to_string()).to_string(),
            "Invalid configuration: bad"
        );
    }
}
