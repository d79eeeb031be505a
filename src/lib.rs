//! Facade crate for the evacroute evacuation-route ranking engine.
//!
//! This crate re-exports the core domain types and, behind the
//! `routing-http` feature, the GeoJSON zone loaders and the
//! OpenRouteService-backed route provider.

#![forbid(unsafe_code)]

pub use evacroute_core::{
    Candidate, GeoHazardAnalyzer, GuidanceTracker, HazardAnalyzer, HazardZone, Instruction,
    Ranking, RiskAssessment, RiskBand, RiskFallback, RiskSource, RouteProvider, RouteScorer,
    RoutedPath, RoutingError, SafeZone, ScoreError, ScoreWeights, ScoredCandidate, count_turns,
    format_duration, next_instruction, route_candidates,
};

#[cfg(feature = "routing-http")]
pub use evacroute_data::{
    HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError, ZoneLoadError,
    load_hazard_zones, load_safe_zones, parse_hazard_zones, parse_safe_zones,
};
