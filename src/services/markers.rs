// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON marker feed for the map view.

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::models::Workout;

/// Build one point feature per workout, in list order.
///
/// Properties carry what the popup needs: the title and a CSS class per kind.
pub fn workout_markers<'a, I>(workouts: I) -> FeatureCollection
where
    I: IntoIterator<Item = &'a Workout>,
{
    let features = workouts.into_iter().map(workout_marker).collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn workout_marker(workout: &Workout) -> Feature {
    let location = workout.location();
    // GeoJSON positions are [lng, lat].
    let geometry = Geometry::new(Value::Point(vec![location.lng, location.lat]));

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), workout.id().into());
    properties.insert("kind".to_string(), workout.kind().as_str().into());
    properties.insert("description".to_string(), workout.description().into());
    properties.insert(
        "popupClass".to_string(),
        format!("{}-popup", workout.kind().as_str()).into(),
    );

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(Id::Number(workout.id().into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, WorkoutDraft};

    #[test]
    fn test_marker_uses_lng_lat_order() {
        let workout = Workout::create(
            &WorkoutDraft::cycling(12.0, 40.0, 80.0),
            Location::new(37.5, -122.25),
        )
        .unwrap();

        let collection = workout_markers([&workout]);
        let feature = &collection.features[0];

        match &feature.geometry.as_ref().unwrap().value {
            Value::Point(coords) => assert_eq!(coords, &vec![-122.25, 37.5]),
            other => panic!("unexpected geometry {:?}", other),
        }
        let props = feature.properties.as_ref().unwrap();
        assert_eq!(props["popupClass"], "cycling-popup");
        assert_eq!(props["id"], workout.id());
    }

    #[test]
    fn test_empty_collection_serializes() {
        let json = serde_json::to_string(&workout_markers(std::iter::empty::<&Workout>())).unwrap();
        assert!(json.contains("FeatureCollection"));
    }
}
