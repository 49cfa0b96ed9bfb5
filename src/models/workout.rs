// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model: a logged run or ride with its derived display values.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::codec::{CodecError, FlatWorkout};
use crate::error::{AppError, Result};
use crate::time_utils::{format_local_month_day, truncate_to_millis};

/// Workout identifier (creation time in epoch milliseconds).
pub type WorkoutId = u64;

static LAST_ISSUED_ID: AtomicU64 = AtomicU64::new(0);

/// Issue an id from the millisecond clock.
///
/// Ids are strictly increasing within the process, so two workouts created
/// in the same millisecond still get distinct ids.
pub fn next_workout_id(now: DateTime<Utc>) -> WorkoutId {
    let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let mut last = LAST_ISSUED_ID.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(last.saturating_add(1));
        match LAST_ISSUED_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Make sure future ids are issued above an id loaded from storage.
pub fn observe_workout_id(id: WorkoutId) {
    LAST_ISSUED_ID.fetch_max(id, Ordering::Relaxed);
}

/// Workout type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Discriminator as stored (`"running"` / `"cycling"`).
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Parse a stored discriminator. Unknown kinds return `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "running" => Some(WorkoutKind::Running),
            "cycling" => Some(WorkoutKind::Cycling),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃",
            WorkoutKind::Cycling => "🚴",
        }
    }
}

/// A map position, stored as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Location {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Location> for [f64; 2] {
    fn from(location: Location) -> Self {
        [location.lat, location.lng]
    }
}

/// Kind-specific measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    /// Steps per minute, always positive.
    Running { cadence_spm: f64 },
    /// Meters climbed; may be zero or negative.
    Cycling { elevation_gain_m: f64 },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Form input for a new or edited workout.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkoutDraft {
    pub kind: WorkoutKind,
    #[validate(range(exclusive_min = 0.0, message = "distance must be a positive number"))]
    pub distance_km: f64,
    #[validate(range(exclusive_min = 0.0, message = "duration must be a positive number"))]
    pub duration_min: f64,
    #[validate(range(exclusive_min = 0.0, message = "cadence must be a positive number"))]
    #[serde(default)]
    pub cadence_spm: Option<f64>,
    #[serde(default)]
    pub elevation_gain_m: Option<f64>,
    /// Where the user clicked on the map, if anywhere.
    #[serde(default)]
    pub location: Option<Location>,
}

impl WorkoutDraft {
    pub fn running(distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance_km,
            duration_min,
            cadence_spm: Some(cadence_spm),
            elevation_gain_m: None,
            location: None,
        }
    }

    pub fn cycling(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            distance_km,
            duration_min,
            cadence_spm: None,
            elevation_gain_m: Some(elevation_gain_m),
            location: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Check the draft and extract the measurements for its kind.
    fn checked_details(&self) -> Result<WorkoutDetails> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Range rules let NaN through.
        if !self.distance_km.is_finite() || !self.duration_min.is_finite() {
            return Err(AppError::Validation(
                "inputs have to be finite numbers".to_string(),
            ));
        }

        match self.kind {
            WorkoutKind::Running => {
                let cadence_spm = self.cadence_spm.ok_or_else(|| {
                    AppError::Validation("running workouts need a cadence".to_string())
                })?;
                if !cadence_spm.is_finite() {
                    return Err(AppError::Validation(
                        "cadence must be a finite number".to_string(),
                    ));
                }
                Ok(WorkoutDetails::Running { cadence_spm })
            }
            WorkoutKind::Cycling => {
                let elevation_gain_m = self.elevation_gain_m.ok_or_else(|| {
                    AppError::Validation("cycling workouts need an elevation gain".to_string())
                })?;
                if !elevation_gain_m.is_finite() {
                    return Err(AppError::Validation(
                        "elevation gain must be a finite number".to_string(),
                    ));
                }
                Ok(WorkoutDetails::Cycling { elevation_gain_m })
            }
        }
    }
}

/// A logged workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    distance_km: f64,
    duration_min: f64,
    location: Location,
    interaction_count: u32,
    details: WorkoutDetails,
    description: String,
}

impl Workout {
    /// Build a new workout from validated form input.
    pub fn create(draft: &WorkoutDraft, location: Location) -> Result<Self> {
        let details = draft.checked_details()?;
        let created_at = truncate_to_millis(Utc::now());

        let mut workout = Self {
            id: next_workout_id(created_at),
            created_at,
            distance_km: draft.distance_km,
            duration_min: draft.duration_min,
            location,
            interaction_count: 0,
            details,
            description: String::new(),
        };
        workout.refresh_description();
        Ok(workout)
    }

    /// Rebuild a workout from its stored form.
    ///
    /// Stored data is trusted, so creation rules are not re-applied.
    pub fn import_flat(
        kind: WorkoutKind,
        flat: FlatWorkout,
    ) -> std::result::Result<Self, CodecError> {
        let details = match kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence_spm: flat.cadence_spm.ok_or(CodecError::MissingField("cadenceSpm"))?,
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain_m: flat
                    .elevation_gain_m
                    .ok_or(CodecError::MissingField("elevationGainM"))?,
            },
        };

        let mut workout = Self {
            id: flat.id,
            created_at: flat.created_at,
            distance_km: flat.distance_km,
            duration_min: flat.duration_min,
            location: flat.location,
            interaction_count: flat.interaction_count,
            details,
            description: flat.description,
        };
        workout.refresh_description();
        Ok(workout)
    }

    /// Overwrite the creation timestamp.
    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.created_at = date;
        self.refresh_description();
    }

    /// Take over the identity of the workout this one replaces.
    pub(crate) fn adopt_identity(&mut self, original: &Workout) {
        self.id = original.id;
        self.set_date(original.created_at);
    }

    /// Record that the user selected this workout.
    pub fn activate(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    fn refresh_description(&mut self) {
        let kind = self.kind();
        self.description = format!(
            "{} {} on {}",
            kind.emoji(),
            kind.label(),
            format_local_month_day(self.created_at)
        );
    }

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn details(&self) -> WorkoutDetails {
        self.details
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cadence_spm(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { cadence_spm } => Some(cadence_spm),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain_m(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { elevation_gain_m } => Some(elevation_gain_m),
            WorkoutDetails::Running { .. } => None,
        }
    }

    /// Minutes per kilometer (runs only).
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { .. } => Some(self.duration_min / self.distance_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    /// Kilometers per hour (rides only).
    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { .. } => Some(self.distance_km / (self.duration_min / 60.0)),
            WorkoutDetails::Running { .. } => None,
        }
    }
}
