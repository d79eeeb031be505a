//! Hazard risk for a single route.
//!
//! Risk is a step function of how close a route comes to any hazard zone:
//! crossing a zone is the ceiling, passing within [`PROXIMITY_THRESHOLD_KM`]
//! of a zone centroid is high, anything else is the baseline. Long walks then
//! pick up an uncapped [`TIME_PENALTY`].

use geo::{Coord, LineString};

use crate::hazard::{HazardAnalyzer, HazardZone};

/// Risk of a route that crosses a hazard zone.
pub const INTERSECTION_RISK: f64 = 1.0;
/// Risk of a route passing close to a hazard zone centroid.
pub const PROXIMITY_RISK: f64 = 0.8;
/// Risk of a route clear of every hazard zone.
pub const BASELINE_RISK: f64 = 0.1;
/// Centroid distance, in kilometres, below which [`PROXIMITY_RISK`] applies.
pub const PROXIMITY_THRESHOLD_KM: f64 = 0.1;
/// Walking time, in seconds, above which [`TIME_PENALTY`] is added.
pub const TIME_PENALTY_THRESHOLD_SECS: f64 = 1_800.0;
/// Risk added to routes slower than [`TIME_PENALTY_THRESHOLD_SECS`].
pub const TIME_PENALTY: f64 = 0.5;

/// Where a risk value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RiskSource {
    /// Computed from the route geometry and the hazard zones.
    Geometry,
    /// The path had fewer than two points, so the baseline was used.
    DegeneratePath,
    /// No hazard analyzer was available; the value is random.
    RandomFallback,
}

/// Behaviour of a scorer that has no [`HazardAnalyzer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFallback {
    /// Draw risk uniformly from `[0, 1)`.
    ///
    /// With a seed the draws are reproducible; without one the generator is
    /// seeded from the operating system.
    Random {
        /// Optional generator seed.
        seed: Option<u64>,
    },
    /// Refuse to score and report the missing capability.
    Fail,
}

impl Default for RiskFallback {
    fn default() -> Self {
        Self::Random { seed: None }
    }
}

/// A risk value and its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    /// Risk before the time penalty, in `[0, 1]`.
    pub value: f64,
    /// How `value` was obtained.
    pub source: RiskSource,
}

impl RiskAssessment {
    /// Construct an assessment.
    #[must_use]
    pub const fn new(value: f64, source: RiskSource) -> Self {
        Self { value, source }
    }

    /// Baseline assessment for a path too short to form a line.
    #[must_use]
    pub const fn degenerate() -> Self {
        Self::new(BASELINE_RISK, RiskSource::DegeneratePath)
    }
}

/// Assess how dangerous `path` is relative to `zones`.
///
/// Paths with fewer than two points cannot form a line and receive
/// [`RiskAssessment::degenerate`]. Zones whose centroid distance is undefined
/// only take part in the intersection test.
///
/// # Examples
/// ```
/// use geo::{Coord, polygon};
/// use evacroute_core::{GeoHazardAnalyzer, HazardZone, risk::assess_path_risk};
///
/// let zone = HazardZone::new(None, polygon![
///     (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0),
/// ]);
/// let path = [Coord { x: -1.0, y: 0.5 }, Coord { x: 2.0, y: 0.5 }];
/// let risk = assess_path_risk(&GeoHazardAnalyzer, &path, &[zone]);
/// assert_eq!(risk.value, 1.0);
/// ```
pub fn assess_path_risk<A>(analyzer: &A, path: &[Coord<f64>], zones: &[HazardZone]) -> RiskAssessment
where
    A: HazardAnalyzer + ?Sized,
{
    if path.len() < 2 {
        return RiskAssessment::degenerate();
    }
    let line = LineString::new(path.to_vec());

    let mut nearest_km: Option<f64> = None;
    for zone in zones {
        if analyzer.intersects(&line, &zone.geometry) {
            return RiskAssessment::new(INTERSECTION_RISK, RiskSource::Geometry);
        }
        if let Some(distance) = analyzer.centroid_distance_km(&zone.geometry, &line) {
            nearest_km = Some(nearest_km.map_or(distance, |current| current.min(distance)));
        }
    }

    let value = match nearest_km {
        Some(distance) if distance < PROXIMITY_THRESHOLD_KM => PROXIMITY_RISK,
        _ => BASELINE_RISK,
    };
    RiskAssessment::new(value, RiskSource::Geometry)
}

/// Add [`TIME_PENALTY`] to `risk` when the walk exceeds half an hour.
///
/// The result is not capped, so penalised risk can reach `1.5`.
///
/// # Examples
/// ```
/// use evacroute_core::risk::apply_time_penalty;
///
/// assert_eq!(apply_time_penalty(0.1, 1_800.0), 0.1);
/// assert_eq!(apply_time_penalty(1.0, 1_801.0), 1.5);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the time penalty is an additive float adjustment"
)]
#[must_use]
pub fn apply_time_penalty(risk: f64, duration_seconds: f64) -> f64 {
    if duration_seconds > TIME_PENALTY_THRESHOLD_SECS {
        risk + TIME_PENALTY
    } else {
        risk
    }
}
