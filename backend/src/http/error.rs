//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::response::JsonResponse;
use crate::db::repository::RepositoryError;

/// Message for undecodable request bodies.
pub const INVALID_INPUT: &str = "Invalid input data";
/// Message for malformed list query parameters.
pub const INVALID_QUERY: &str = "Invalid query parameters";
/// Message for unknown segment ids.
pub const SEGMENT_NOT_FOUND: &str = "Segment not found";
/// Message for retryable store failures.
pub const SERVICE_UNAVAILABLE: &str = "Service unavailable";
/// Message for everything else that went wrong on our side.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `"error"`
    pub code: String,
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: "error".to_string(),
            error: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (undecodable body or query)
    BadRequest(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    pub fn segment_not_found() -> Self {
        AppError::NotFound(SEGMENT_NOT_FOUND.to_string())
    }

    pub fn invalid_input() -> Self {
        AppError::BadRequest(INVALID_INPUT.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Repository(e) if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                tracing::debug!(%status, "{}", msg);
                msg
            }
            AppError::Repository(e) if e.is_not_found() => {
                tracing::debug!(%status, "{}", e);
                SEGMENT_NOT_FOUND.to_string()
            }
            AppError::Repository(e) if e.is_retryable() => {
                tracing::warn!(%status, "{}", e);
                SERVICE_UNAVAILABLE.to_string()
            }
            AppError::Repository(e) => {
                tracing::error!(%status, "{}", e);
                INTERNAL_ERROR.to_string()
            }
        };

        JsonResponse::new(status, ApiError::new(message)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
