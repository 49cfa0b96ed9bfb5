// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout: {0}")]
    Validation(String),

    #[error("Workout not found: {0}")]
    NotFound(u64),

    #[error("Another workout is being edited")]
    SessionBusy,

    #[error("No workout is being edited")]
    NoActiveEdit,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Busy refusals are feedback for the user, not failures.
    pub fn is_busy(&self) -> bool {
        matches!(self, AppError::SessionBusy)
    }
}

impl From<crate::db::BackendError> for AppError {
    fn from(err: crate::db::BackendError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<crate::db::CodecError> for AppError {
    fn from(err: crate::db::CodecError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(msg.clone()),
            ),
            AppError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                Some(format!("No workout with id {}", id)),
            ),
            AppError::SessionBusy => (StatusCode::CONFLICT, "session_busy", None),
            AppError::NoActiveEdit => (StatusCode::CONFLICT, "no_active_edit", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Persistence(msg) => {
                tracing::error!(error = %msg, "Persistence error");
                (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
