//! Obtain walking routes from an origin to each safe zone.
//!
//! The `RouteProvider` trait abstracts the routing service. Callers supply an
//! origin and a destination and receive a [`RoutedPath`]: the route geometry
//! together with its length and walking time. [`route_candidates`] turns a
//! safe-zone listing into scorer input, dropping zones whose route failed.

mod error;
mod provider;

pub use error::RoutingError;
pub use provider::{RouteProvider, RoutedPath, route_candidates};
