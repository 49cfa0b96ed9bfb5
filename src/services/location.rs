// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Where a new workout is pinned on the map.

use crate::models::Location;

/// Source of the user's current position.
pub trait LocationProvider: Send + Sync {
    /// `None` when the position is unavailable (e.g. permission denied).
    fn current_location(&self) -> Option<Location>;
}

/// Provider for hosts without geolocation: always a fixed position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Location);

impl LocationProvider for FixedLocation {
    fn current_location(&self) -> Option<Location> {
        Some(self.0)
    }
}

/// Provider that never knows the position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_location(&self) -> Option<Location> {
        None
    }
}

/// Pick the location for a new workout: the map click if there was one,
/// then the provider's position, then the configured fallback pair.
pub fn resolve_location(
    clicked: Option<Location>,
    provider: &dyn LocationProvider,
    fallback: Location,
) -> Location {
    clicked
        .or_else(|| provider.current_location())
        .unwrap_or_else(|| {
            tracing::debug!(lat = fallback.lat, lng = fallback.lng, "Using fallback location");
            fallback
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_wins() {
        let clicked = Location::new(1.0, 2.0);
        let provider = FixedLocation(Location::new(3.0, 4.0));
        assert_eq!(
            resolve_location(Some(clicked), &provider, Location::new(42.0, 42.0)),
            clicked
        );
    }

    #[test]
    fn test_provider_then_fallback() {
        let fallback = Location::new(42.0, 42.0);
        let provider = FixedLocation(Location::new(3.0, 4.0));

        assert_eq!(
            resolve_location(None, &provider, fallback),
            Location::new(3.0, 4.0)
        );
        assert_eq!(resolve_location(None, &NoLocation, fallback), fallback);
    }
}
