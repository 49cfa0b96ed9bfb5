// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application context: one workout store, one edit session.
//!
//! Every user action on the list is classified into a single `Command` and
//! executed here, so each action runs exactly one core operation.

use crate::error::{AppError, Result};
use crate::models::{Location, SortSpec, Workout, WorkoutDraft, WorkoutId};
use crate::services::location::{resolve_location, LocationProvider};
use crate::services::session::EditSession;
use crate::services::sort::sort_keys;
use crate::services::store::WorkoutStore;

/// An action taken on an item of the workout list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Pan the map to a workout (counts as a selection).
    MoveTo(WorkoutId),
    Delete(WorkoutId),
    Edit(WorkoutId),
    Sort(SortSpec),
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    MovedTo(Workout),
    Deleted(Workout),
    Editing(Workout),
    Sorted(Vec<WorkoutId>),
}

pub struct Tracker {
    store: WorkoutStore,
    session: EditSession,
    locations: Box<dyn LocationProvider>,
    fallback_location: Location,
}

impl Tracker {
    pub fn new(
        store: WorkoutStore,
        locations: Box<dyn LocationProvider>,
        fallback_location: Location,
    ) -> Self {
        Self {
            store,
            session: EditSession::Idle,
            locations,
            fallback_location,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.workouts()
    }

    pub fn find(&self, id: WorkoutId) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    /// Run one list action.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome> {
        tracing::debug!(?command, "Dispatching command");
        match command {
            Command::MoveTo(id) => self.move_to(id).cloned().map(CommandOutcome::MovedTo),
            Command::Delete(id) => self.delete(id).map(CommandOutcome::Deleted),
            Command::Edit(id) => self.begin_edit(id).map(CommandOutcome::Editing),
            Command::Sort(spec) => self.sort(spec).map(CommandOutcome::Sorted),
        }
    }

    /// Log a new workout. Refused while an edit is open.
    pub fn create_workout(&mut self, draft: &WorkoutDraft) -> Result<&Workout> {
        self.session.ensure_idle()?;
        let location = resolve_location(
            draft.location,
            self.locations.as_ref(),
            self.fallback_location,
        );
        let workout = Workout::create(draft, location)?;
        self.store.add(workout)
    }

    pub fn move_to(&mut self, id: WorkoutId) -> Result<&Workout> {
        self.store.activate(id)
    }

    /// Delete a workout. The workout under edit cannot be deleted.
    pub fn delete(&mut self, id: WorkoutId) -> Result<Workout> {
        if self.session.target().is_some_and(|w| w.id() == id) {
            return Err(AppError::SessionBusy);
        }
        self.store.remove(id)
    }

    /// Open an edit on `id`. Busy takes precedence over an unknown id.
    pub fn begin_edit(&mut self, id: WorkoutId) -> Result<Workout> {
        self.session.ensure_idle()?;
        let workout = self
            .store
            .find_by_id(id)
            .cloned()
            .ok_or(AppError::NotFound(id))?;
        self.session.begin_edit(workout.clone())?;
        Ok(workout)
    }

    pub fn commit_edit(&mut self, draft: &WorkoutDraft) -> Result<&Workout> {
        self.session.commit(&mut self.store, draft)
    }

    pub fn cancel_edit(&mut self) -> Option<Workout> {
        self.session.cancel()
    }

    /// Display order for `spec`. Refused while an edit is open.
    pub fn sort(&self, spec: SortSpec) -> Result<Vec<WorkoutId>> {
        self.session.ensure_idle()?;
        Ok(sort_keys(self.store.workouts(), spec.field, spec.direction))
    }

    /// Workouts in display order; stored order when `spec` is `None`.
    pub fn ordered_workouts(&self, spec: Option<SortSpec>) -> Result<Vec<&Workout>> {
        let Some(spec) = spec else {
            return Ok(self.store.workouts().iter().collect());
        };

        Ok(self
            .sort(spec)?
            .into_iter()
            .filter_map(|id| self.store.find_by_id(id))
            .collect())
    }

    /// Reset: drop all workouts and any open edit.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.session.cancel();
        Ok(())
    }
}
