//! Route provider trait and the safe-zone to candidate conversion.

use geo::Coord;

use crate::candidate::{Candidate, SafeZone};

use super::error::RoutingError;

/// A walking route returned by a [`RouteProvider`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutedPath {
    /// Route geometry in `[lon, lat]` order.
    pub path: Vec<Coord<f64>>,
    /// Total length in metres.
    pub distance_meters: f64,
    /// Estimated walking time in seconds.
    pub duration_seconds: f64,
}

impl RoutedPath {
    /// Construct a routed path.
    #[must_use]
    pub const fn new(path: Vec<Coord<f64>>, distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            path,
            distance_meters,
            duration_seconds,
        }
    }

    /// Report whether the route can be scored.
    ///
    /// A usable route has at least one point and finite, non-negative
    /// metrics.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let metric_ok = |value: f64| value.is_finite() && value >= 0.0;
        !self.path.is_empty() && metric_ok(self.distance_meters) && metric_ok(self.duration_seconds)
    }
}

/// Fetch walking routes between coordinates.
///
/// Implementations must be thread-safe (`Send` + `Sync`).
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use evacroute_core::{RouteProvider, RoutedPath, RoutingError};
///
/// struct StraightLine;
///
/// impl RouteProvider for StraightLine {
///     fn route(
///         &self,
///         origin: Coord<f64>,
///         destination: Coord<f64>,
///     ) -> Result<RoutedPath, RoutingError> {
///         Ok(RoutedPath::new(vec![origin, destination], 100.0, 72.0))
///     }
/// }
///
/// let routed = StraightLine.route(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.001 })?;
/// assert_eq!(routed.path.len(), 2);
/// # Ok::<(), RoutingError>(())
/// ```
pub trait RouteProvider: Send + Sync {
    /// Return the walking route from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns a [`RoutingError`] when the service is unreachable, rejects
    /// the request or finds no route.
    fn route(&self, origin: Coord<f64>, destination: Coord<f64>)
    -> Result<RoutedPath, RoutingError>;

    /// Route from `origin` to every destination, preserving input order.
    ///
    /// The default issues one [`RouteProvider::route`] call at a time.
    /// Providers with a concurrent transport should override it.
    fn routes(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Vec<Result<RoutedPath, RoutingError>> {
        destinations
            .iter()
            .map(|destination| self.route(origin, *destination))
            .collect()
    }
}

/// Route to every safe zone and keep the ones that produced a usable route.
///
/// Failed and malformed routes are logged at warn level and dropped.
/// Candidates keep the order of `zones`; unnamed zones are labelled by their
/// position in the listing.
pub fn route_candidates<P>(provider: &P, origin: Coord<f64>, zones: &[SafeZone]) -> Vec<Candidate>
where
    P: RouteProvider + ?Sized,
{
    let destinations: Vec<Coord<f64>> = zones.iter().map(|zone| zone.location).collect();
    let routed = provider.routes(origin, &destinations);

    zones
        .iter()
        .zip(routed)
        .enumerate()
        .filter_map(|(index, (zone, result))| {
            let name = zone.display_name(index);
            match result {
                Ok(route) if route.is_well_formed() => Some(Candidate::new(
                    name,
                    zone.location,
                    route.path,
                    route.distance_meters,
                    route.duration_seconds,
                )),
                Ok(_) => {
                    log::warn!("dropping {name}: routing service returned a malformed route");
                    None
                }
                Err(err) => {
                    log::warn!("dropping {name}: {err}");
                    None
                }
            }
        })
        .collect()
}
