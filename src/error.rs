//! Error types for the service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::quota::QuotaError;

// == Service Error Enum ==
/// Unified error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown subscription tier name
    #[error("Invalid subscription tier: {0}")]
    InvalidTier(String),

    /// Durable quota store failure
    #[error("Quota store error: {0}")]
    QuotaStore(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QuotaError> for ServiceError {
    fn from(error: QuotaError) -> Self {
        match error {
            QuotaError::InvalidTier(e) => ServiceError::InvalidTier(e.0),
            QuotaError::Store(e) => ServiceError::QuotaStore(e.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServiceError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::InvalidTier(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid subscription tier: {}", msg),
            ),
            ServiceError::QuotaStore(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP surface.
pub type Result<T> = std::result::Result<T, ServiceError>;
