//! HTTP-based `RouteProvider` using the OpenRouteService directions API.
//!
//! This module provides [`HttpRouteProvider`], an implementation of the
//! [`RouteProvider`] trait that fetches walking routes over HTTP.
//!
//! # Architecture
//!
//! The [`RouteProvider`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.
//! Batch requests run concurrently up to a configured limit and keep their
//! input order.
//!
//! # Example
//!
//! ```no_run
//! use evacroute_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//! use evacroute_core::RouteProvider;
//! use geo::Coord;
//!
//! let config = HttpRouteProviderConfig::default().with_api_key("my-key");
//! let provider = HttpRouteProvider::with_config(config)?;
//! let route = provider.route(Coord { x: -78.445, y: -0.314 }, Coord { x: -78.44, y: -0.31 })?;
//! println!("{} m in {} s", route.distance_meters, route.duration_seconds);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use evacroute_core::{RouteProvider, RoutedPath, RoutingError};
use futures_util::stream::{self, StreamExt};
use geo::Coord;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::ors::{DirectionsRequest, DirectionsResponse, ErrorResponse};

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default OpenRouteService endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "foot-walking";

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "evacroute/0.1";

/// Default number of requests in flight during a batch.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRouteProvider`].
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRouteProviderConfig {
    /// Base URL of the routing service, e.g. `"https://api.openrouteservice.org"`.
    pub base_url: String,
    /// API key sent in the `Authorization` header, if any.
    pub api_key: Option<String>,
    /// Routing profile, e.g. `"foot-walking"`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Maximum number of requests in flight during a batch.
    pub concurrency: usize,
}

impl std::fmt::Debug for HttpRouteProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRouteProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the batch concurrency limit. Zero is treated as one.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// HTTP-based route provider using the OpenRouteService directions API.
///
/// This provider implements the synchronous [`RouteProvider`] trait by
/// internally blocking on asynchronous HTTP requests. It owns a Tokio
/// runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it falls back to its own runtime, which may
/// deadlock if the caller's runtime drives I/O this request depends on.
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRouteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRouteProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRouteProvider {
    /// Create a provider for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// Build the directions URL: `{base_url}/v2/directions/{profile}/geojson`.
    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }

    /// Fetch one route asynchronously.
    async fn fetch_route_async(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RoutedPath, RoutingError> {
        let url = self.directions_url();
        let mut request = self
            .client
            .post(&url)
            .json(&DirectionsRequest::between(origin, destination));
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        if !status.is_success() {
            return Err(convert_error_body(&url, status.as_u16(), &body));
        }

        let directions: DirectionsResponse =
            serde_json::from_str(&body).map_err(|err| RoutingError::ParseError {
                message: err.to_string(),
            })?;
        convert_response(directions)
    }

    /// Fetch routes to every destination with bounded concurrency.
    async fn fetch_routes_async(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Vec<Result<RoutedPath, RoutingError>> {
        stream::iter(destinations.iter().copied())
            .map(|destination| self.fetch_route_async(origin, destination))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}

/// Map a non-success response to a `RoutingError`.
///
/// Bodies in the service's error format become [`RoutingError::ServiceError`];
/// anything else is reported as [`RoutingError::HttpError`].
fn convert_error_body(url: &str, status: u16, body: &str) -> RoutingError {
    serde_json::from_str::<ErrorResponse>(body).map_or_else(
        |_| RoutingError::HttpError {
            url: url.to_owned(),
            status,
            message: body.trim().to_owned(),
        },
        |response| {
            let (code, message) = response.error.into_parts();
            RoutingError::ServiceError { code, message }
        },
    )
}

/// Convert a directions response to a `RoutedPath`.
///
/// The first feature must carry a `LineString` and a summary.
fn convert_response(response: DirectionsResponse) -> Result<RoutedPath, RoutingError> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;

    let geometry = feature
        .geometry
        .filter(super::ors::RouteGeometry::is_line_string)
        .ok_or_else(|| RoutingError::ParseError {
            message: "route feature has no LineString geometry".to_owned(),
        })?;
    let summary = feature
        .properties
        .summary
        .ok_or_else(|| RoutingError::ParseError {
            message: "route feature has no summary".to_owned(),
        })?;

    let path = geometry
        .coordinates
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(RoutingError::ParseError {
                message: "route position has fewer than two components".to_owned(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RoutedPath::new(path, summary.distance, summary.duration))
}

impl RouteProvider for HttpRouteProvider {
    fn route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RoutedPath, RoutingError> {
        self.block_on(self.fetch_route_async(origin, destination))
    }

    /// Route to every destination concurrently.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded. See the type-level documentation.
    fn routes(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Vec<Result<RoutedPath, RoutingError>> {
        if destinations.is_empty() {
            return Vec::new();
        }
        log::debug!(
            "requesting {} routes from {} with up to {} in flight",
            destinations.len(),
            self.directions_url(),
            self.config.concurrency.max(1)
        );
        self.block_on(self.fetch_routes_async(origin, destinations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ors::{RouteFeature, RouteGeometry, RouteProperties, RouteSummary};
    use rstest::rstest;

    fn feature(kind: &str, coordinates: Vec<Vec<f64>>, summary: Option<RouteSummary>) -> RouteFeature {
        RouteFeature {
            geometry: Some(RouteGeometry {
                kind: kind.to_owned(),
                coordinates,
            }),
            properties: RouteProperties { summary },
        }
    }

    #[rstest]
    #[case("https://ors.example.com", "https://ors.example.com/v2/directions/foot-walking/geojson")]
    #[case("https://ors.example.com/", "https://ors.example.com/v2/directions/foot-walking/geojson")]
    fn directions_url_includes_profile(#[case] base: &str, #[case] expected: &str) {
        let provider = HttpRouteProvider::new(base).expect("provider should build");
        assert_eq!(provider.directions_url(), expected);
    }

    #[rstest]
    fn custom_profile_changes_url() {
        let config = HttpRouteProviderConfig::new("http://localhost:8080").with_profile("foot-hiking");
        let provider = HttpRouteProvider::with_config(config).expect("provider should build");
        assert_eq!(
            provider.directions_url(),
            "http://localhost:8080/v2/directions/foot-hiking/geojson"
        );
    }

    #[rstest]
    fn converts_line_string_feature() {
        let response = DirectionsResponse {
            features: vec![feature(
                "LineString",
                vec![vec![-78.445, -0.314, 2510.0], vec![-78.44, -0.31, 2502.0]],
                Some(RouteSummary {
                    distance: 812.4,
                    duration: 584.9,
                }),
            )],
        };

        let routed = convert_response(response).expect("should convert");

        assert_eq!(
            routed.path,
            vec![Coord { x: -78.445, y: -0.314 }, Coord { x: -78.44, y: -0.31 }]
        );
        assert_eq!(routed.distance_meters, 812.4);
        assert_eq!(routed.duration_seconds, 584.9);
    }

    #[rstest]
    fn empty_feature_list_is_no_route() {
        let response = DirectionsResponse { features: Vec::new() };
        assert_eq!(convert_response(response), Err(RoutingError::NoRoute));
    }

    #[rstest]
    #[case::wrong_geometry(feature("Point", vec![vec![0.0, 0.0]], Some(RouteSummary::default())))]
    #[case::missing_summary(feature("LineString", vec![vec![0.0, 0.0]], None))]
    #[case::short_position(feature("LineString", vec![vec![0.0]], Some(RouteSummary::default())))]
    fn rejects_incomplete_features(#[case] route: RouteFeature) {
        let response = DirectionsResponse {
            features: vec![route],
        };
        assert!(matches!(
            convert_response(response),
            Err(RoutingError::ParseError { .. })
        ));
    }

    #[rstest]
    fn error_bodies_become_service_errors() {
        let err = convert_error_body(
            "http://ors.test",
            404,
            r#"{"error":{"code":2010,"message":"Could not find routable point"}}"#,
        );
        assert_eq!(
            err,
            RoutingError::ServiceError {
                code: "2010".to_owned(),
                message: "Could not find routable point".to_owned(),
            }
        );
    }

    #[rstest]
    fn unstructured_bodies_become_http_errors() {
        let err = convert_error_body("http://ors.test", 502, "Bad Gateway\n");
        assert_eq!(
            err,
            RoutingError::HttpError {
                url: "http://ors.test".to_owned(),
                status: 502,
                message: "Bad Gateway".to_owned(),
            }
        );
    }

    #[rstest]
    fn debug_output_redacts_api_key() {
        let config = HttpRouteProviderConfig::default().with_api_key("secret-key");
        assert!(!format!("{config:?}").contains("secret-key"));
    }

    #[rstest]
    fn empty_batch_makes_no_requests() {
        let provider = HttpRouteProvider::new("http://127.0.0.1:9").expect("provider should build");
        assert!(provider.routes(Coord { x: 0.0, y: 0.0 }, &[]).is_empty());
    }
}
