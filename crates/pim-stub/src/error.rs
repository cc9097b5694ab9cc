//! # Stub Error Envelope
//!
//! Handler failures render as the framework's exception body,
//! `{"exc": "<message>", "exc_type": "<Kind>"}`, with a matching status.
//! Internal errors are logged and replaced by a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pim_client::ExceptionBody;
use pim_core::ValidationError;
use thiserror::Error;

/// Application-level error type for the stub's method handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown method or record (404).
    #[error("{0}")]
    NotFound(String),

    /// A save rule or link check failed (417, the framework's convention).
    #[error("{0}")]
    Validation(String),

    /// Missing or malformed arguments (400).
    #[error("{0}")]
    BadRequest(String),

    /// A record with the same name already exists (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500). Logged, never returned to the client.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and the `exc_type` written to the body.
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "DoesNotExistError"),
            Self::Validation(_) => (StatusCode::EXPECTATION_FAILED, "ValidationError"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "TypeError"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "DuplicateEntryError"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalServerError"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let exc = match &self {
            Self::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error in method handler");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        let body = ExceptionBody {
            exc,
            exc_type: Some(kind.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("serialization failed: {err}"))
    }
}
