//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use repokit_core::error::{AppError, ErrorKind, StoreError};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(AppError::from(err))
    }
}

impl ApiError {
    /// HTTP status and error code for the wrapped error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Database => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status();
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.0.message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}
