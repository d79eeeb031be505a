//! Hazard zones and the geometry capability used to test routes against them.
//!
//! The scorer never talks to a geometry library directly. It asks a
//! [`HazardAnalyzer`] two questions per hazard polygon: does the route cross
//! it, and how far is the polygon's centroid from the route. Tests bind fakes
//! with fixed answers; production code binds [`GeoHazardAnalyzer`].

use geo::{Centroid, Closest, ClosestPoint, Distance, Haversine, Intersects, LineString, Polygon};

const METRES_PER_KILOMETRE: f64 = 1_000.0;

/// A polygon of elevated danger, such as a lahar flow path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardZone {
    /// Label from the hazard listing, if any.
    pub name: Option<String>,
    /// Zone outline in WGS84 `[lon, lat]` coordinates.
    pub geometry: Polygon<f64>,
}

impl HazardZone {
    /// Construct a hazard zone.
    #[must_use]
    pub const fn new(name: Option<String>, geometry: Polygon<f64>) -> Self {
        Self { name, geometry }
    }
}

/// Geometry tests between a route and a hazard polygon.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so a scorer can be
/// shared across threads.
///
/// # Examples
///
/// ```rust
/// use geo::{LineString, Polygon};
/// use evacroute_core::HazardAnalyzer;
///
/// struct FarAway;
///
/// impl HazardAnalyzer for FarAway {
///     fn intersects(&self, _path: &LineString<f64>, _zone: &Polygon<f64>) -> bool {
///         false
///     }
///
///     fn centroid_distance_km(&self, _zone: &Polygon<f64>, _path: &LineString<f64>) -> Option<f64> {
///         Some(10.0)
///     }
/// }
///
/// let line = LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]);
/// let zone = Polygon::new(LineString::from(vec![(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]), vec![]);
/// assert!(!FarAway.intersects(&line, &zone));
/// ```
pub trait HazardAnalyzer: Send + Sync {
    /// Report whether `path` touches or crosses `zone`.
    fn intersects(&self, path: &LineString<f64>, zone: &Polygon<f64>) -> bool;

    /// Distance in kilometres from the centroid of `zone` to `path`.
    ///
    /// Returns `None` when the distance is undefined, e.g. for a polygon
    /// without a centroid.
    fn centroid_distance_km(&self, zone: &Polygon<f64>, path: &LineString<f64>) -> Option<f64>;
}

/// [`HazardAnalyzer`] backed by the `geo` crate.
///
/// The closest point on the route is found in planar degree space and the
/// distance to it is measured along the great circle.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoHazardAnalyzer;

impl HazardAnalyzer for GeoHazardAnalyzer {
    fn intersects(&self, path: &LineString<f64>, zone: &Polygon<f64>) -> bool {
        path.intersects(zone)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "converting metres to kilometres requires division"
    )]
    fn centroid_distance_km(&self, zone: &Polygon<f64>, path: &LineString<f64>) -> Option<f64> {
        let centroid = zone.centroid()?;
        let nearest = match path.closest_point(&centroid) {
            Closest::Intersection(point) | Closest::SinglePoint(point) => point,
            Closest::Indeterminate => return None,
        };
        Some(Haversine.distance(centroid, nearest) / METRES_PER_KILOMETRE)
    }
}
