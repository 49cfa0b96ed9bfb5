// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Tracker API Server
//!
//! Serves the persisted workout list to the map frontend.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    db::FileBackend,
    services::{NoLocation, Tracker, WorkoutStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout-Tracker API");

    // Open storage and load saved workouts
    let backend = FileBackend::open(&config.data_file)?;
    let (store, summary) = WorkoutStore::load(Arc::new(backend))?;
    for skipped in &summary.skipped {
        tracing::warn!(
            index = skipped.index,
            reason = %skipped.reason,
            "Stored workout could not be restored"
        );
    }

    // The server has no geolocation of its own; new workouts without a map
    // click land on the configured fallback position.
    let tracker = Tracker::new(store, Box::new(NoLocation), config.fallback_location);

    let state = Arc::new(AppState::new(config.clone(), tracker));

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["workout_tracker=debug", "info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry().with(filter).with(format).init();
}
