// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flat JSON encoding of the workout list.
//!
//! Each workout is stored as one flat object tagged with its `kind`. Derived
//! values (pace, speed) are never stored; they are recomputed on demand.
//! Loading is forgiving: a missing or unreadable blob yields an empty list,
//! and individual entries that cannot be decoded are skipped and reported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::workout::{Location, Workout, WorkoutDetails, WorkoutId, WorkoutKind};

/// Stored form of one workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatWorkout {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    pub location: Location,
    #[serde(with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain_m: Option<f64>,
    #[serde(default)]
    pub interaction_count: u32,
    #[serde(default)]
    pub description: String,
}

impl From<&Workout> for FlatWorkout {
    fn from(workout: &Workout) -> Self {
        let (cadence_spm, elevation_gain_m) = match workout.details() {
            WorkoutDetails::Running { cadence_spm } => (Some(cadence_spm), None),
            WorkoutDetails::Cycling { elevation_gain_m } => (None, Some(elevation_gain_m)),
        };

        Self {
            id: workout.id(),
            kind: workout.kind(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            location: workout.location(),
            created_at: workout.created_at(),
            cadence_spm,
            elevation_gain_m,
            interaction_count: workout.interaction_count(),
            description: workout.description().to_string(),
        }
    }
}

/// An entry dropped while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// Position in the stored array.
    pub index: usize,
    pub reason: String,
}

/// Result of decoding a stored blob.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub workouts: Vec<Workout>,
    pub skipped: Vec<SkippedEntry>,
    /// The blob was present but could not be parsed at all.
    pub discarded_blob: bool,
}

/// Encode the full ordered workout list.
pub fn save(workouts: &[Workout]) -> Result<String, CodecError> {
    let flat: Vec<FlatWorkout> = workouts.iter().map(FlatWorkout::from).collect();
    serde_json::to_string(&flat).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a stored blob. Never fails; see `LoadOutcome` for what was dropped.
///
/// Of several entries sharing an id, the first one wins.
pub fn load(blob: Option<&str>) -> LoadOutcome {
    let Some(blob) = blob else {
        return LoadOutcome::default();
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(blob) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unparsable workout data");
            return LoadOutcome {
                discarded_blob: true,
                ..LoadOutcome::default()
            };
        }
    };

    let mut outcome = LoadOutcome::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let decoded = decode_entry(entry).and_then(|workout| {
            if outcome.workouts.iter().any(|w| w.id() == workout.id()) {
                Err(CodecError::DuplicateId(workout.id()))
            } else {
                Ok(workout)
            }
        });
        match decoded {
            Ok(workout) => outcome.workouts.push(workout),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping stored workout");
                outcome.skipped.push(SkippedEntry {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}

fn decode_entry(entry: serde_json::Value) -> Result<Workout, CodecError> {
    let raw_kind = entry
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or(CodecError::MissingField("kind"))?;

    let kind =
        WorkoutKind::parse(raw_kind).ok_or_else(|| CodecError::UnknownKind(raw_kind.to_string()))?;

    let flat: FlatWorkout =
        serde_json::from_value(entry).map_err(|e| CodecError::Decode(e.to_string()))?;

    Workout::import_flat(kind, flat)
}

/// Errors from encoding or decoding workouts.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to encode workouts: {0}")]
    Encode(String),

    #[error("Failed to decode workout: {0}")]
    Decode(String),

    #[error("Unknown workout kind: {0}")]
    UnknownKind(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Duplicate workout id {0}")]
    DuplicateId(WorkoutId),
}

mod rfc3339_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::time_utils::format_utc_rfc3339;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workout::WorkoutDraft;

    fn sample() -> Vec<Workout> {
        let mut run =
            Workout::create(&WorkoutDraft::running(5.5, 24.0, 178.0), Location::new(37.375, -122.125))
                .unwrap();
        run.activate();
        let ride =
            Workout::create(&WorkoutDraft::cycling(27.25, 95.0, -40.0), Location::new(37.5, -122.25))
                .unwrap();
        vec![run, ride]
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let workouts = sample();
        let blob = save(&workouts).unwrap();
        let outcome = load(Some(&blob));

        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.workouts, workouts);
    }

    #[test]
    fn test_round_trip_empty() {
        let blob = save(&[]).unwrap();
        assert_eq!(blob, "[]");
        assert!(load(Some(&blob)).workouts.is_empty());
    }

    #[test]
    fn test_stored_shape() {
        let blob = save(&sample()[..1]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let entry = &value[0];

        assert_eq!(entry["kind"], "running");
        assert_eq!(entry["distanceKm"], 5.5);
        assert_eq!(entry["cadenceSpm"], 178.0);
        assert_eq!(entry["interactionCount"], 1);
        assert!(entry["location"].is_array());
        assert!(entry.get("elevationGainM").is_none());
        assert!(entry.get("pace").is_none());
        assert!(entry["createdAt"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_absent_and_garbage_blobs_load_empty() {
        let absent = load(None);
        assert!(absent.workouts.is_empty());
        assert!(!absent.discarded_blob);

        let garbage = load(Some("{not json"));
        assert!(garbage.workouts.is_empty());
        assert!(garbage.discarded_blob);

        let wrong_shape = load(Some(r#"{"workouts": []}"#));
        assert!(wrong_shape.discarded_blob);
    }

    #[test]
    fn test_unknown_kind_is_skipped_not_fatal() {
        let blob = r#"[
            {"kind":"swimming","id":1,"distanceKm":1.0,"durationMin":30.0,
             "location":[1.0,2.0],"createdAt":"2024-04-14T12:00:00.000Z"},
            {"durationMin":30.0,"id":2,"kind":"running","distanceKm":5.0,
             "cadenceSpm":160.0,"location":[1.0,2.0],"createdAt":"2024-04-14T12:00:00.000Z"}
        ]"#;

        let outcome = load(Some(blob));

        assert_eq!(outcome.workouts.len(), 1);
        assert_eq!(outcome.workouts[0].id(), 2);
        assert_eq!(outcome.workouts[0].description(), "🏃 Running on April 14");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 0);
        assert!(outcome.skipped[0].reason.contains("swimming"));
    }

    #[test]
    fn test_duplicate_id_reports_stored_position() {
        let blob = r#"[
            {"kind":"swimming","id":9,"distanceKm":1.0,"durationMin":30.0,
             "location":[1.0,2.0],"createdAt":"2024-04-14T12:00:00.000Z"},
            {"kind":"running","id":10,"distanceKm":5.0,"durationMin":30.0,"cadenceSpm":160.0,
             "location":[1.0,2.0],"createdAt":"2024-04-14T12:00:00.000Z"},
            {"kind":"running","id":10,"distanceKm":8.0,"durationMin":40.0,"cadenceSpm":165.0,
             "location":[1.0,2.0],"createdAt":"2024-04-14T12:00:00.000Z"}
        ]"#;

        let outcome = load(Some(blob));

        assert_eq!(outcome.workouts.len(), 1);
        assert_eq!(outcome.workouts[0].distance_km(), 5.0);
        let indexes: Vec<usize> = outcome.skipped.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 2]);
        assert!(outcome.skipped[1].reason.contains("Duplicate workout id 10"));
    }

    #[test]
    fn test_entry_missing_kind_specific_field_is_skipped() {
        let blob = r#"[{"kind":"cycling","id":3,"distanceKm":10.0,"durationMin":30.0,
            "location":[1.0,2.0],"createdAt":"2024-04-14T12:00:00.000Z"}]"#;

        let outcome = load(Some(blob));

        assert!(outcome.workouts.is_empty());
        assert!(outcome.skipped[0].reason.contains("elevationGainM"));
    }
}
