//! Data access for evacroute: zone files and the walking-route service.
//!
//! Responsibilities:
//! - Load safe zones and hazard zones from GeoJSON files.
//! - Provide [`routing::HttpRouteProvider`], an OpenRouteService-backed
//!   implementation of [`evacroute_core::RouteProvider`].
//!
//! Boundaries:
//! - Do not encode ranking rules (live in `evacroute-core`).
//! - Keep blocking I/O off async executors; the route provider owns its
//!   runtime and bridges to the synchronous trait.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod fs;
pub mod routing;
pub mod zones;

pub use routing::{HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError};
pub use zones::{
    ZoneLoadError, load_hazard_zones, load_safe_zones, parse_hazard_zones, parse_safe_zones,
};
