// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: key-value backends and the workout codec.

pub mod backend;
pub mod codec;

pub use backend::{BackendError, FileBackend, KeyValueBackend, MemoryBackend};
pub use codec::{CodecError, FlatWorkout, LoadOutcome, SkippedEntry};

/// Backend keys as constants.
pub mod keys {
    /// The full workout list, as one JSON array.
    pub const WORKOUTS: &str = "workouts";
}
