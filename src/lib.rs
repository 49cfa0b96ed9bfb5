// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout-Tracker: log runs and rides on a map
//!
//! This crate keeps a persisted list of workouts with an exclusive edit
//! session and sortable views, and serves it to a map frontend over a local
//! HTTP API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::Tracker;
use tokio::sync::Mutex;

/// Shared application state.
///
/// The tracker sits behind one lock, so each request's mutation and its
/// save complete before the next request touches the list.
pub struct AppState {
    pub config: Config,
    pub tracker: Mutex<Tracker>,
}

impl AppState {
    pub fn new(config: Config, tracker: Tracker) -> Self {
        Self {
            config,
            tracker: Mutex::new(tracker),
        }
    }
}
