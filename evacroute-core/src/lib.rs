//! Core domain types and the route ranking algorithm for evacroute.
//!
//! Responsibilities:
//! - Model safe zones, routed candidates and hazard zones.
//! - Score routed candidates by distance, duration, hazard risk and path
//!   complexity, then rank them best first ([`RouteScorer`]).
//! - Define the seams to external collaborators: [`RouteProvider`] for
//!   walking routes and [`HazardAnalyzer`] for geometry tests.
//! - Derive turn-by-turn guidance along a chosen path.
//!
//! Boundaries:
//! - No I/O. Routing services and zone files live in `evacroute-data`.
//!
//! Invariants:
//! - Scoring is a pure function of its inputs, apart from the explicitly
//!   flagged random risk fallback.
//! - Coordinates are WGS84 with `x = longitude` and `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod candidate;
pub mod guidance;
pub mod hazard;
pub mod normalise;
pub mod presentation;
pub mod risk;
pub mod routing;
pub mod scorer;
pub mod turns;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use candidate::{Candidate, SafeZone, zone_display_name};
pub use guidance::{GuidanceTracker, Instruction, next_instruction};
pub use hazard::{GeoHazardAnalyzer, HazardAnalyzer, HazardZone};
pub use normalise::{Bounds, Criteria, CriteriaBounds};
pub use presentation::{RiskBand, format_duration};
pub use risk::{RiskAssessment, RiskFallback, RiskSource};
pub use routing::{RouteProvider, RoutedPath, RoutingError, route_candidates};
pub use scorer::{Ranking, RouteScorer, ScoreError, ScoreWeights, ScoredCandidate};
pub use turns::count_turns;
