// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use workout_tracker::config::Config;
use workout_tracker::db::MemoryBackend;
use workout_tracker::routes::create_router;
use workout_tracker::services::{NoLocation, Tracker, WorkoutStore};
use workout_tracker::AppState;

/// Create a test app backed by in-memory storage.
/// Returns the router, the shared state and a handle on the storage.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryBackend) {
    create_test_app_with(MemoryBackend::new())
}

/// Create a test app over existing storage (loads whatever it holds).
#[allow(dead_code)]
pub fn create_test_app_with(backend: MemoryBackend) -> (axum::Router, Arc<AppState>, MemoryBackend) {
    let config = Config::test_default();
    let (store, _) =
        WorkoutStore::load(Arc::new(backend.clone())).expect("Failed to load test store");
    let tracker = Tracker::new(store, Box::new(NoLocation), config.fallback_location);
    let state = Arc::new(AppState::new(config, tracker));

    (create_router(state.clone()), state, backend)
}

/// Build a request with an optional JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
