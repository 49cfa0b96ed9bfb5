// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_tracker::db::{BackendError, CodecError};
use workout_tracker::error::AppError;

mod common;
use common::body_json;

#[test]
fn test_is_busy_matches() {
    assert!(AppError::SessionBusy.is_busy());

    assert!(!AppError::NoActiveEdit.is_busy());
    assert!(!AppError::NotFound(7).is_busy());
    assert!(!AppError::Validation("distance".to_string()).is_busy());
}

#[test]
fn test_storage_errors_become_persistence() {
    let err = AppError::from(BackendError::Io("disk full".to_string()));
    assert!(matches!(err, AppError::Persistence(msg) if msg.contains("disk full")));

    let err = AppError::from(CodecError::MissingField("cadenceSpm"));
    assert!(matches!(err, AppError::Persistence(msg) if msg.contains("cadenceSpm")));
}

#[tokio::test]
async fn test_error_responses() {
    let cases = [
        (
            AppError::Validation("x".to_string()),
            StatusCode::BAD_REQUEST,
            "validation_error",
        ),
        (AppError::NotFound(3), StatusCode::NOT_FOUND, "not_found"),
        (AppError::SessionBusy, StatusCode::CONFLICT, "session_busy"),
        (AppError::NoActiveEdit, StatusCode::CONFLICT, "no_active_edit"),
        (
            AppError::Persistence("quota".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "persistence_error",
        ),
    ];

    for (err, status, code) in cases {
        let response = err.into_response();
        assert_eq!(response.status(), status);
        assert_eq!(body_json(response).await["error"], code);
    }
}

#[tokio::test]
async fn test_internal_details_are_not_exposed() {
    let response = AppError::Persistence("/home/user/data.json: EACCES".to_string()).into_response();
    let body = body_json(response).await;

    assert!(body.get("details").is_none());
}
