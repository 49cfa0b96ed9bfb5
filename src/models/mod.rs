// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod sort;
pub mod workout;

pub use sort::{SortDirection, SortField, SortSpec};
pub use workout::{Location, Workout, WorkoutDetails, WorkoutDraft, WorkoutId, WorkoutKind};
