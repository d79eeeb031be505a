//! Walking routes from an OpenRouteService-compatible directions API.
//!
//! [`HttpRouteProvider`] implements [`evacroute_core::RouteProvider`] by
//! posting each origin/destination pair to `/v2/directions/{profile}/geojson`
//! and converting the first returned feature into a
//! [`evacroute_core::RoutedPath`]. Batches are issued concurrently and keep
//! their input order.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use evacroute_core::RouteProvider;
//! use evacroute_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//! use geo::Coord;
//!
//! let config = HttpRouteProviderConfig::new("http://localhost:8080/ors")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_concurrency(8);
//! let provider = HttpRouteProvider::with_config(config)?;
//!
//! let origin = Coord { x: -78.445, y: -0.314 };
//! let zones = [Coord { x: -78.44, y: -0.31 }, Coord { x: -78.45, y: -0.32 }];
//! for result in provider.routes(origin, &zones) {
//!     match result {
//!         Ok(route) => println!("{} m", route.distance_meters),
//!         Err(err) => eprintln!("skipped: {err}"),
//!     }
//! }
//! # Ok::<(), evacroute_data::ProviderBuildError>(())
//! ```

mod ors;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_PROFILE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError,
};
