// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordering of workouts for display.

use std::cmp::Ordering;

use crate::models::{SortDirection, SortField, Workout, WorkoutId};

/// Value a workout contributes to a sort, if the field applies to its kind.
pub fn sort_value(workout: &Workout, field: SortField) -> Option<f64> {
    match field {
        SortField::Distance => Some(workout.distance_km()),
        SortField::Duration => Some(workout.duration_min()),
        SortField::Pace => workout.pace_min_per_km(),
        SortField::Speed => workout.speed_km_per_h(),
        SortField::Cadence => workout.cadence_spm(),
        SortField::Elevation => workout.elevation_gain_m(),
        SortField::Clicks => Some(f64::from(workout.interaction_count())),
    }
}

/// Compute the display order of `workouts` without touching them.
///
/// The sort is stable: equal values keep their original relative order.
/// Workouts the field does not apply to (e.g. pace on a ride) follow all
/// others in their original order, whichever the direction.
pub fn sort_keys(workouts: &[Workout], field: SortField, direction: SortDirection) -> Vec<WorkoutId> {
    let mut keyed: Vec<(Option<f64>, WorkoutId)> = workouts
        .iter()
        .map(|w| (sort_value(w, field), w.id()))
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.total_cmp(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, WorkoutDraft};

    fn run(distance_km: f64) -> Workout {
        Workout::create(
            &WorkoutDraft::running(distance_km, 30.0, 170.0),
            Location::new(0.0, 0.0),
        )
        .unwrap()
    }

    fn ride(distance_km: f64, duration_min: f64) -> Workout {
        Workout::create(
            &WorkoutDraft::cycling(distance_km, duration_min, 0.0),
            Location::new(0.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_ascending_is_stable() {
        let workouts = vec![run(5.0), run(3.0), run(5.0)];
        let order = sort_keys(&workouts, SortField::Distance, SortDirection::Ascending);

        assert_eq!(
            order,
            vec![workouts[1].id(), workouts[0].id(), workouts[2].id()]
        );
    }

    #[test]
    fn test_descending_is_stable() {
        let workouts = vec![run(5.0), run(3.0), run(5.0), run(8.0)];
        let order = sort_keys(&workouts, SortField::Distance, SortDirection::Descending);

        assert_eq!(
            order,
            vec![
                workouts[3].id(),
                workouts[0].id(),
                workouts[2].id(),
                workouts[1].id()
            ]
        );
    }

    #[test]
    fn test_inapplicable_field_sorts_last() {
        // 20 km in 60 min = 20 km/h, 30 km in 60 min = 30 km/h
        let workouts = vec![run(5.0), ride(20.0, 60.0), run(6.0), ride(30.0, 60.0)];
        let order = sort_keys(&workouts, SortField::Speed, SortDirection::Descending);

        assert_eq!(
            order,
            vec![
                workouts[3].id(),
                workouts[1].id(),
                workouts[0].id(),
                workouts[2].id()
            ]
        );
    }

    #[test]
    fn test_sort_is_pure() {
        let workouts = vec![run(5.0), run(3.0)];
        let before = workouts.clone();

        let first = sort_keys(&workouts, SortField::Distance, SortDirection::Ascending);
        let second = sort_keys(&workouts, SortField::Distance, SortDirection::Ascending);

        assert_eq!(first, second);
        assert_eq!(workouts, before);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_keys(&[], SortField::Pace, SortDirection::Ascending).is_empty());
    }
}
