//! Fixture files and stub collaborators for CLI tests.

use std::cell::RefCell;

use camino::{Utf8Path, Utf8PathBuf};
use evacroute_core::test_support::StubRouteProvider;
use evacroute_core::{RouteProvider, RoutedPath, RoutingError};
use evacroute_data::routing::HttpRouteProviderConfig;
use geo::Coord;
use tempfile::TempDir;

use crate::CliError;
use crate::evaluate::RouteProviderBuilder;

pub(super) const ORIGIN: Coord<f64> = Coord {
    x: -78.445,
    y: -0.314,
};
pub(super) const COLISEO: Coord<f64> = Coord { x: -78.44, y: -0.31 };
pub(super) const PARQUE: Coord<f64> = Coord {
    x: -78.45,
    y: -0.32,
};

/// Two named safe zones north-east and south-west of [`ORIGIN`].
pub(super) const SAFE_ZONES_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "properties": { "nombre": "Coliseo" },
          "geometry": { "type": "Point", "coordinates": [-78.44, -0.31] } },
        { "type": "Feature", "properties": { "nombre": "Parque" },
          "geometry": { "type": "Point", "coordinates": [-78.45, -0.32] } }
    ]
}"#;

/// A lahar square straddling the straight walk from [`ORIGIN`] to [`PARQUE`].
pub(super) const HAZARD_ZONES_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "properties": { "name": "Lahar sur" },
          "geometry": { "type": "Polygon", "coordinates": [[
              [-78.4485, -0.318], [-78.4465, -0.318], [-78.4465, -0.316],
              [-78.4485, -0.316], [-78.4485, -0.318]
          ]] } }
    ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

pub(super) fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace")
}

/// Straight route from [`ORIGIN`] to `destination`.
pub(super) fn straight_route(destination: Coord<f64>) -> RoutedPath {
    RoutedPath::new(vec![ORIGIN, destination], 800.0, 600.0)
}

/// Provider routing both safe zones in a straight line.
pub(super) fn routing_both_zones() -> StubRouteProvider {
    StubRouteProvider::default()
        .with_route(COLISEO, straight_route(COLISEO))
        .with_route(PARQUE, straight_route(PARQUE))
}

/// Provider that fails for both safe zones.
pub(super) fn routing_no_zones() -> StubRouteProvider {
    StubRouteProvider::default()
        .with_failure(COLISEO, RoutingError::NoRoute)
        .with_failure(
            PARQUE,
            RoutingError::Timeout {
                url: "http://ors.test/v2/directions/foot-walking/geojson".to_owned(),
                timeout_secs: 30,
            },
        )
}

/// Builder handing out a clone of a stub provider and recording the config.
#[derive(Debug, Default)]
pub(super) struct StubProviderBuilder {
    pub(super) provider: StubRouteProvider,
    pub(super) seen: RefCell<Option<HttpRouteProviderConfig>>,
}

impl StubProviderBuilder {
    pub(super) fn new(provider: StubRouteProvider) -> Self {
        Self {
            provider,
            seen: RefCell::new(None),
        }
    }
}

impl RouteProviderBuilder for StubProviderBuilder {
    fn build(&self, config: &HttpRouteProviderConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        self.seen.replace(Some(config.clone()));
        Ok(Box::new(self.provider.clone()))
    }
}
