// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The authoritative, persisted workout list.
//!
//! Every mutation is saved before it returns. If the save fails the
//! in-memory list is rolled back, so memory never runs ahead of storage.

use std::sync::Arc;

use crate::db::{codec, keys, BackendError, KeyValueBackend, SkippedEntry};
use crate::error::{AppError, Result};
use crate::models::workout::{observe_workout_id, Workout, WorkoutId};

/// What happened while loading stored workouts.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: Vec<SkippedEntry>,
    /// Stored data was unreadable and has been ignored.
    pub discarded_blob: bool,
}

/// Ordered workout collection backed by a key-value store.
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    backend: Arc<dyn KeyValueBackend>,
}

impl WorkoutStore {
    /// Create an empty store without reading the backend.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            workouts: Vec::new(),
            backend,
        }
    }

    /// Load the stored workout list.
    ///
    /// Absent or corrupt data starts an empty store; only I/O failures are
    /// returned as errors.
    pub fn load(backend: Arc<dyn KeyValueBackend>) -> Result<(Self, LoadSummary)> {
        let blob = match backend.get(keys::WORKOUTS) {
            Ok(blob) => blob,
            Err(BackendError::Corrupt(e)) => {
                tracing::warn!(error = %e, "Stored data is corrupt, starting empty");
                return Ok((
                    Self::new(backend),
                    LoadSummary {
                        discarded_blob: true,
                        ..LoadSummary::default()
                    },
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = codec::load(blob.as_deref());
        for workout in &outcome.workouts {
            observe_workout_id(workout.id());
        }

        let workouts = outcome.workouts;
        let summary = LoadSummary {
            loaded: workouts.len(),
            skipped: outcome.skipped,
            discarded_blob: outcome.discarded_blob,
        };
        tracing::info!(
            loaded = summary.loaded,
            skipped = summary.skipped.len(),
            discarded = summary.discarded_blob,
            "Loaded workouts"
        );

        Ok((Self { workouts, backend }, summary))
    }

    /// Workouts in stored order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn find_by_id(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    fn position(&self, id: WorkoutId) -> Result<usize> {
        self.workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or(AppError::NotFound(id))
    }

    /// Append a new workout.
    pub fn add(&mut self, workout: Workout) -> Result<&Workout> {
        let id = workout.id();
        if self.find_by_id(id).is_some() {
            return Err(AppError::BadRequest(format!("Duplicate workout id {}", id)));
        }

        self.mutate(|workouts| {
            workouts.push(workout);
            Ok(())
        })?;
        tracing::info!(id, "Workout added");

        let index = self.workouts.len() - 1;
        Ok(&self.workouts[index])
    }

    /// Replace the workout `old_id` with an edited version.
    ///
    /// The replacement inherits the original's id and creation date and
    /// takes its place in the list.
    pub fn replace(&mut self, old_id: WorkoutId, mut replacement: Workout) -> Result<&Workout> {
        let index = self.position(old_id)?;
        replacement.adopt_identity(&self.workouts[index]);

        self.mutate(|workouts| {
            workouts[index] = replacement;
            Ok(())
        })?;
        tracing::info!(id = old_id, "Workout replaced");

        Ok(&self.workouts[index])
    }

    /// Delete a workout.
    pub fn remove(&mut self, id: WorkoutId) -> Result<Workout> {
        let index = self.position(id)?;
        let removed = self.mutate(|workouts| Ok(workouts.remove(index)))?;
        tracing::info!(id, "Workout removed");
        Ok(removed)
    }

    /// Count a selection of the workout.
    pub fn activate(&mut self, id: WorkoutId) -> Result<&Workout> {
        let index = self.position(id)?;
        self.mutate(|workouts| {
            workouts[index].activate();
            Ok(())
        })?;
        tracing::debug!(id, "Workout activated");
        Ok(&self.workouts[index])
    }

    /// Drop every workout and erase stored data. Irreversible.
    pub fn clear_all(&mut self) -> Result<()> {
        self.backend.remove(keys::WORKOUTS)?;
        let count = self.workouts.len();
        self.workouts.clear();
        tracing::info!(count, "All workouts cleared");
        Ok(())
    }

    fn mutate<T>(&mut self, op: impl FnOnce(&mut Vec<Workout>) -> Result<T>) -> Result<T> {
        let snapshot = self.workouts.clone();
        let value = op(&mut self.workouts)?;

        if let Err(e) = self.save() {
            tracing::error!(error = %e, "Save failed, rolling back");
            self.workouts = snapshot;
            return Err(e);
        }

        Ok(value)
    }

    fn save(&self) -> Result<()> {
        let blob = codec::save(&self.workouts)?;
        self.backend.set(keys::WORKOUTS, &blob)?;
        tracing::debug!(count = self.workouts.len(), "Saved workouts");
        Ok(())
    }
}
