// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout list API.
//!
//! Each list action maps to exactly one tracker command; refusals caused by
//! an open edit come back as `409 session_busy`.

use crate::error::{AppError, Result};
use crate::models::{SortSpec, Workout, WorkoutDraft, WorkoutId, WorkoutKind};
use crate::services::{workout_markers, Command, CommandOutcome, EditSession};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Workout API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts).post(create_workout).delete(clear_workouts),
        )
        .route(
            "/api/workouts/{id}",
            get(get_workout).delete(delete_workout),
        )
        .route("/api/workouts/{id}/activate", post(activate_workout))
        .route("/api/workouts/{id}/edit", post(begin_edit))
        .route(
            "/api/edit",
            get(get_edit).put(commit_edit).delete(cancel_edit),
        )
        .route("/api/markers", get(get_markers))
}

// ─── Response Types ──────────────────────────────────────────

/// Workout as shown in the list, with derived metrics.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub description: String,
    pub distance_km: f64,
    pub duration_min: f64,
    /// `[lat, lng]`
    pub location: [f64; 2],
    pub created_at: String,
    pub interaction_count: u32,
    pub cadence_spm: Option<f64>,
    pub elevation_gain_m: Option<f64>,
    pub pace_min_per_km: Option<f64>,
    pub speed_km_per_h: Option<f64>,
}

impl From<&Workout> for WorkoutResponse {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id(),
            kind: workout.kind(),
            description: workout.description().to_string(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            location: workout.location().into(),
            created_at: format_utc_rfc3339(workout.created_at()),
            interaction_count: workout.interaction_count(),
            cadence_spm: workout.cadence_spm(),
            elevation_gain_m: workout.elevation_gain_m(),
            pace_min_per_km: workout.pace_min_per_km(),
            speed_km_per_h: workout.speed_km_per_h(),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    pub workouts: Vec<WorkoutResponse>,
    /// Sort option applied, if any (e.g. `distance_ascending`)
    pub sort: Option<String>,
    pub total: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EditStateResponse {
    pub editing: bool,
    pub workout: Option<WorkoutResponse>,
}

impl From<&EditSession> for EditStateResponse {
    fn from(session: &EditSession) -> Self {
        Self {
            editing: session.is_editing(),
            workout: session.target().map(WorkoutResponse::from),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClearResponse {
    pub success: bool,
    pub removed: u32,
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Sort option id, e.g. `pace_descending`
    sort: Option<String>,
}

fn parse_sort(raw: Option<&str>) -> Result<Option<SortSpec>> {
    raw.map(|raw| {
        raw.parse::<SortSpec>()
            .map_err(|e| AppError::BadRequest(format!("Invalid 'sort' parameter: {}", e)))
    })
    .transpose()
}

/// List workouts in stored order, or in the requested sort order.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<WorkoutsResponse>> {
    let spec = parse_sort(params.sort.as_deref())?;
    let tracker = state.tracker.lock().await;
    let workouts: Vec<WorkoutResponse> = tracker
        .ordered_workouts(spec)?
        .into_iter()
        .map(WorkoutResponse::from)
        .collect();

    tracing::debug!(count = workouts.len(), sort = ?params.sort, "Listing workouts");

    Ok(Json(WorkoutsResponse {
        total: workouts.len() as u32,
        workouts,
        sort: spec.map(|s| s.to_string()),
    }))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<WorkoutResponse>> {
    let tracker = state.tracker.lock().await;
    let workout = tracker.find(id).ok_or(AppError::NotFound(id))?;
    Ok(Json(WorkoutResponse::from(workout)))
}

/// Map marker feed (GeoJSON FeatureCollection).
async fn get_markers(State(state): State<Arc<AppState>>) -> Json<geojson::FeatureCollection> {
    let tracker = state.tracker.lock().await;
    Json(workout_markers(tracker.workouts()))
}

// ─── Mutations ───────────────────────────────────────────────

/// Log a new workout from form input.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<WorkoutDraft>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    let mut tracker = state.tracker.lock().await;
    let workout = tracker.create_workout(&draft)?;
    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<WorkoutResponse>> {
    let mut tracker = state.tracker.lock().await;
    match tracker.dispatch(Command::Delete(id))? {
        CommandOutcome::Deleted(workout) => Ok(Json(WorkoutResponse::from(&workout))),
        other => Err(unexpected(other)),
    }
}

/// Select a workout: the frontend pans the map to its location.
async fn activate_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<WorkoutResponse>> {
    let mut tracker = state.tracker.lock().await;
    match tracker.dispatch(Command::MoveTo(id))? {
        CommandOutcome::MovedTo(workout) => Ok(Json(WorkoutResponse::from(&workout))),
        other => Err(unexpected(other)),
    }
}

/// Delete every workout and the stored data.
async fn clear_workouts(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>> {
    let mut tracker = state.tracker.lock().await;
    let removed = tracker.workouts().len() as u32;
    tracker.clear_all()?;

    tracing::info!(removed, "User reset all workouts");
    Ok(Json(ClearResponse {
        success: true,
        removed,
    }))
}

// ─── Edit Session ────────────────────────────────────────────

async fn begin_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<WorkoutResponse>> {
    let mut tracker = state.tracker.lock().await;
    match tracker.dispatch(Command::Edit(id))? {
        CommandOutcome::Editing(workout) => Ok(Json(WorkoutResponse::from(&workout))),
        other => Err(unexpected(other)),
    }
}

async fn get_edit(State(state): State<Arc<AppState>>) -> Json<EditStateResponse> {
    let tracker = state.tracker.lock().await;
    Json(EditStateResponse::from(tracker.session()))
}

/// Commit the open edit with the submitted form values.
async fn commit_edit(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<WorkoutDraft>,
) -> Result<Json<WorkoutResponse>> {
    let mut tracker = state.tracker.lock().await;
    let workout = tracker.commit_edit(&draft)?;
    Ok(Json(WorkoutResponse::from(workout)))
}

async fn cancel_edit(State(state): State<Arc<AppState>>) -> Json<EditStateResponse> {
    let mut tracker = state.tracker.lock().await;
    let cancelled = tracker.cancel_edit();
    Json(EditStateResponse {
        editing: false,
        workout: cancelled.as_ref().map(WorkoutResponse::from),
    })
}

fn unexpected(outcome: CommandOutcome) -> AppError {
    AppError::Internal(anyhow::anyhow!("unexpected command outcome: {:?}", outcome))
}
