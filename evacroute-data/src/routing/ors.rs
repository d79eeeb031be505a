//! OpenRouteService directions API wire types.
//!
//! Requests go to `POST /v2/directions/{profile}/geojson` with a body of
//! `{"coordinates": [[lon, lat], [lon, lat]]}`. Successful responses are a
//! GeoJSON `FeatureCollection` whose first feature carries the route line and
//! a `summary` of its length and duration. OpenRouteService omits summary
//! fields whose value is zero.
//!
//! See: <https://giscience.github.io/openrouteservice/api-reference/endpoints/directions/>

use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Body of a directions request.
#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    /// Waypoints in `[lon, lat]` order.
    pub coordinates: [[f64; 2]; 2],
}

impl DirectionsRequest {
    /// Request a route between two points.
    #[must_use]
    pub const fn between(origin: Coord<f64>, destination: Coord<f64>) -> Self {
        Self {
            coordinates: [[origin.x, origin.y], [destination.x, destination.y]],
        }
    }
}

/// Directions API response in GeoJSON form.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Alternative routes; the first is the recommended one.
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

/// One route.
#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    /// Route line, if present.
    pub geometry: Option<RouteGeometry>,
    /// Route metadata.
    #[serde(default)]
    pub properties: RouteProperties,
}

/// GeoJSON geometry of a route.
#[derive(Debug, Deserialize)]
pub struct RouteGeometry {
    /// Geometry type; routes are `"LineString"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Positions in `[lon, lat]` or `[lon, lat, elevation]` order.
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

impl RouteGeometry {
    /// Report whether the geometry is a line string.
    #[must_use]
    pub fn is_line_string(&self) -> bool {
        self.kind == "LineString"
    }
}

/// Route metadata.
#[derive(Debug, Default, Deserialize)]
pub struct RouteProperties {
    /// Route totals, if present.
    pub summary: Option<RouteSummary>,
}

/// Route totals.
#[derive(Debug, Default, Deserialize)]
pub struct RouteSummary {
    /// Length in metres.
    #[serde(default)]
    pub distance: f64,
    /// Walking time in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// Error body returned with non-success HTTP statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error detail.
    pub error: ErrorDetail,
}

/// Error detail; structured for routing failures, a bare string otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Routing engine error with a numeric or textual code.
    Structured {
        /// Service error code, e.g. `2010` for an unroutable point.
        code: Option<ErrorCode>,
        /// Human-readable description.
        message: Option<String>,
    },
    /// Gateway-level error such as an invalid API key.
    Text(String),
}

/// Service error code.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    /// Numeric code.
    Number(i64),
    /// Textual code.
    Text(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(code) => write!(f, "{code}"),
            Self::Text(code) => f.write_str(code),
        }
    }
}

impl ErrorDetail {
    /// Split into a code and a message.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        match self {
            Self::Structured { code, message } => (
                code.map_or_else(|| "unknown".to_owned(), |value| value.to_string()),
                message.unwrap_or_default(),
            ),
            Self::Text(message) => ("unknown".to_owned(), message),
        }
    }
}
