//! Deterministic collaborators for unit and behaviour tests.
//!
//! Compiled for this crate's own tests and behind the `test-support` feature.

use geo::{Coord, LineString, Polygon};

use crate::{HazardAnalyzer, RouteProvider, RoutedPath, RoutingError};

/// `HazardAnalyzer` that gives the same answer for every zone.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FixedHazardAnalyzer {
    intersects: bool,
    distance_km: Option<f64>,
}

impl FixedHazardAnalyzer {
    /// Every route crosses every zone.
    #[must_use]
    pub const fn intersecting() -> Self {
        Self {
            intersects: true,
            distance_km: Some(0.0),
        }
    }

    /// Every route crosses every zone whose centroid is `distance_km` away.
    #[must_use]
    pub const fn intersecting_at(distance_km: f64) -> Self {
        Self {
            intersects: true,
            distance_km: Some(distance_km),
        }
    }

    /// No route crosses a zone; every centroid is `distance_km` away.
    #[must_use]
    pub const fn at_distance(distance_km: f64) -> Self {
        Self {
            intersects: false,
            distance_km: Some(distance_km),
        }
    }

    /// No route crosses a zone and no centroid distance is defined.
    #[must_use]
    pub const fn clear() -> Self {
        Self {
            intersects: false,
            distance_km: None,
        }
    }
}

impl HazardAnalyzer for FixedHazardAnalyzer {
    fn intersects(&self, _path: &LineString<f64>, _zone: &Polygon<f64>) -> bool {
        self.intersects
    }

    fn centroid_distance_km(&self, _zone: &Polygon<f64>, _path: &LineString<f64>) -> Option<f64> {
        self.distance_km
    }
}

/// `RouteProvider` answering from a fixed table keyed by destination.
///
/// Destinations without an entry yield [`RoutingError::NoRoute`].
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use evacroute_core::test_support::StubRouteProvider;
/// use evacroute_core::{RouteProvider, RoutedPath, RoutingError};
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let zone = Coord { x: 0.0, y: 0.01 };
/// let provider = StubRouteProvider::default()
///     .with_route(zone, RoutedPath::new(vec![origin, zone], 1_100.0, 790.0));
///
/// assert!(provider.route(origin, zone).is_ok());
/// assert_eq!(provider.route(origin, origin), Err(RoutingError::NoRoute));
/// ```
#[derive(Debug, Default, Clone)]
pub struct StubRouteProvider {
    entries: Vec<(Coord<f64>, Result<RoutedPath, RoutingError>)>,
}

impl StubRouteProvider {
    /// Answer requests for `destination` with `route`.
    #[must_use]
    pub fn with_route(mut self, destination: Coord<f64>, route: RoutedPath) -> Self {
        self.entries.push((destination, Ok(route)));
        self
    }

    /// Answer requests for `destination` with `error`.
    #[must_use]
    pub fn with_failure(mut self, destination: Coord<f64>, error: RoutingError) -> Self {
        self.entries.push((destination, Err(error)));
        self
    }
}

impl RouteProvider for StubRouteProvider {
    fn route(
        &self,
        _origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RoutedPath, RoutingError> {
        self.entries
            .iter()
            .find(|(key, _)| *key == destination)
            .map_or(Err(RoutingError::NoRoute), |(_, answer)| answer.clone())
    }
}
