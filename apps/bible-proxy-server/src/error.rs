//! Error types for the bible proxy server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bible_proxy_core::UpstreamError;
use serde_json::json;
use thiserror::Error;

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Deployment fault, not a per-request condition: the upstream
    /// credential is missing, so no request can be forwarded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            ServerError::Upstream(e) => {
                tracing::error!("Upstream error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ServerError::InvalidReference(reference) => (
                StatusCode::BAD_REQUEST,
                format!("Could not parse reference: {}", reference),
            ),
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
