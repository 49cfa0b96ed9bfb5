// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-slot edit session.
//!
//! At most one workout is edited at a time. While an edit is open, anything
//! that needs a quiet list (sorting, starting another edit, creating a new
//! workout) is refused with `AppError::SessionBusy`; the open edit is never
//! committed or dropped on the caller's behalf.

use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutDraft};
use crate::services::store::WorkoutStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSession {
    #[default]
    Idle,
    /// Snapshot of the workout as it was when the edit began.
    Editing(Workout),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    /// The workout under edit, if any.
    pub fn target(&self) -> Option<&Workout> {
        match self {
            EditSession::Editing(workout) => Some(workout),
            EditSession::Idle => None,
        }
    }

    /// Refuse with a busy signal unless idle.
    pub fn ensure_idle(&self) -> Result<()> {
        match self {
            EditSession::Idle => Ok(()),
            EditSession::Editing(workout) => {
                tracing::debug!(editing = workout.id(), "Refusing operation during edit");
                Err(AppError::SessionBusy)
            }
        }
    }

    /// Open an edit. A second edit is refused and the current one kept.
    pub fn begin_edit(&mut self, workout: Workout) -> Result<()> {
        self.ensure_idle()?;
        tracing::info!(id = workout.id(), "Edit started");
        *self = EditSession::Editing(workout);
        Ok(())
    }

    /// Commit the edit into `store`.
    ///
    /// The replacement keeps the original's location, id and creation date.
    /// Invalid input and a vanished target leave the session open; any other
    /// outcome closes it.
    pub fn commit<'s>(
        &mut self,
        store: &'s mut WorkoutStore,
        draft: &WorkoutDraft,
    ) -> Result<&'s Workout> {
        let target = self.target().ok_or(AppError::NoActiveEdit)?;
        let target_id = target.id();
        let replacement = Workout::create(draft, target.location())?;

        match store.replace(target_id, replacement) {
            Ok(workout) => {
                tracing::info!(id = target_id, "Edit committed");
                *self = EditSession::Idle;
                Ok(workout)
            }
            Err(e @ AppError::NotFound(_)) => {
                tracing::warn!(id = target_id, "Edited workout no longer exists");
                Err(e)
            }
            Err(e) => {
                *self = EditSession::Idle;
                Err(e)
            }
        }
    }

    /// Close the edit without touching the store.
    pub fn cancel(&mut self) -> Option<Workout> {
        match std::mem::take(self) {
            EditSession::Editing(workout) => {
                tracing::info!(id = workout.id(), "Edit cancelled");
                Some(workout)
            }
            EditSession::Idle => None,
        }
    }
}
