// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod location;
pub mod markers;
pub mod session;
pub mod sort;
pub mod store;
pub mod tracker;

pub use location::{resolve_location, FixedLocation, LocationProvider, NoLocation};
pub use markers::workout_markers;
pub use session::EditSession;
pub use sort::sort_keys;
pub use store::{LoadSummary, WorkoutStore};
pub use tracker::{Command, CommandOutcome, Tracker};
