// Error types for the scentwise endpoint
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message returned to callers once every candidate model has failed.
pub const BUSY_MESSAGE: &str = "AI service temporarily busy. Please wait a moment and try again.";

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Every candidate model and attempt failed. Carries the last upstream detail.
    #[error("All Gemini models exhausted: {}", .details.as_deref().unwrap_or("no attempts made"))]
    ServiceBusy { details: Option<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::ServiceBusy { .. } => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert ProxyError to HTTP responses for Axum
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ProxyError::ServiceBusy { details } => json!({
                "error": BUSY_MESSAGE,
                "details": details,
            }),
            err @ (ProxyError::NotConfigured | ProxyError::MethodNotAllowed) => json!({
                "error": err.to_string(),
            }),
            other => {
                // Callers only see a generic message; the cause stays in the logs
                tracing::error!("Handler error: {}", other);
                json!({ "error": "Internal server error" })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
