//! Load safe zones and hazard zones from GeoJSON.
//!
//! Input may be a `FeatureCollection`, a single `Feature` or a bare geometry.
//! Safe zones are `Point` features labelled by a `nombre` or `name`
//! property. Hazard zones are `Polygon` or `MultiPolygon` features labelled by
//! `name`; each member of a `MultiPolygon` becomes its own zone. Features with
//! other geometry types are skipped with a warning.

use camino::{Utf8Path, Utf8PathBuf};
use evacroute_core::{HazardZone, SafeZone};
use geo::{Coord, LineString, Polygon};
use geojson::{Feature, GeoJson, JsonObject, Value};
use thiserror::Error;

use crate::fs;

/// Property keys that label a safe zone, in order of preference.
const SAFE_ZONE_NAME_KEYS: [&str; 2] = ["nombre", "name"];

/// Property key that labels a hazard zone.
const HAZARD_NAME_KEY: &str = "name";

/// Errors raised while loading zone files.
#[derive(Debug, Error)]
pub enum ZoneLoadError {
    /// The zone file could not be read.
    #[error("failed to read zone file {path}")]
    Read {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The contents are not valid GeoJSON.
    #[error("invalid GeoJSON")]
    Parse {
        /// Source error from `geojson`.
        #[source]
        source: Box<geojson::Error>,
    },
    /// A position has fewer than two components.
    #[error("feature {feature} has a position without longitude and latitude")]
    InvalidPosition {
        /// Index of the offending feature in the document.
        feature: usize,
    },
}

/// Parse safe zones from GeoJSON text.
///
/// # Errors
///
/// Returns [`ZoneLoadError::Parse`] for malformed GeoJSON and
/// [`ZoneLoadError::InvalidPosition`] for a point without two components.
///
/// # Examples
/// ```
/// use evacroute_data::parse_safe_zones;
///
/// let zones = parse_safe_zones(r#"{
///     "type": "Feature",
///     "properties": { "nombre": "Coliseo" },
///     "geometry": { "type": "Point", "coordinates": [-78.44, -0.31] }
/// }"#)?;
/// assert_eq!(zones[0].name.as_deref(), Some("Coliseo"));
/// assert_eq!(zones[0].location.x, -78.44);
/// # Ok::<(), evacroute_data::ZoneLoadError>(())
/// ```
pub fn parse_safe_zones(text: &str) -> Result<Vec<SafeZone>, ZoneLoadError> {
    let mut zones = Vec::new();
    for (index, feature) in features(text)?.into_iter().enumerate() {
        let name = label(feature.properties.as_ref(), &SAFE_ZONE_NAME_KEYS);
        match feature.geometry.map(|geometry| geometry.value) {
            Some(Value::Point(position)) => {
                let location = coord(&position).ok_or(ZoneLoadError::InvalidPosition {
                    feature: index,
                })?;
                zones.push(SafeZone::new(name, location));
            }
            Some(other) => {
                log::warn!(
                    "skipping safe zone feature {index}: expected Point, found {}",
                    geometry_kind(&other)
                );
            }
            None => log::warn!("skipping safe zone feature {index}: no geometry"),
        }
    }
    Ok(zones)
}

/// Parse hazard zones from GeoJSON text.
///
/// # Errors
///
/// Returns [`ZoneLoadError::Parse`] for malformed GeoJSON and
/// [`ZoneLoadError::InvalidPosition`] for a ring position without two
/// components.
pub fn parse_hazard_zones(text: &str) -> Result<Vec<HazardZone>, ZoneLoadError> {
    let mut zones = Vec::new();
    for (index, feature) in features(text)?.into_iter().enumerate() {
        let name = label(feature.properties.as_ref(), &[HAZARD_NAME_KEY]);
        let invalid = || ZoneLoadError::InvalidPosition { feature: index };
        match feature.geometry.map(|geometry| geometry.value) {
            Some(Value::Polygon(rings)) => {
                zones.push(HazardZone::new(name, polygon(&rings).ok_or_else(invalid)?));
            }
            Some(Value::MultiPolygon(members)) => {
                for rings in &members {
                    let member = polygon(rings).ok_or_else(invalid)?;
                    zones.push(HazardZone::new(name.clone(), member));
                }
            }
            Some(other) => {
                log::warn!(
                    "skipping hazard feature {index}: expected Polygon or MultiPolygon, found {}",
                    geometry_kind(&other)
                );
            }
            None => log::warn!("skipping hazard feature {index}: no geometry"),
        }
    }
    Ok(zones)
}

/// Read and parse a safe-zone file.
///
/// # Errors
///
/// Returns [`ZoneLoadError::Read`] when the file cannot be read, otherwise as
/// [`parse_safe_zones`].
pub fn load_safe_zones(path: &Utf8Path) -> Result<Vec<SafeZone>, ZoneLoadError> {
    let zones = parse_safe_zones(&read(path)?)?;
    log::debug!("loaded {} safe zones from {path}", zones.len());
    Ok(zones)
}

/// Read and parse a hazard-zone file.
///
/// # Errors
///
/// Returns [`ZoneLoadError::Read`] when the file cannot be read, otherwise as
/// [`parse_hazard_zones`].
pub fn load_hazard_zones(path: &Utf8Path) -> Result<Vec<HazardZone>, ZoneLoadError> {
    let zones = parse_hazard_zones(&read(path)?)?;
    log::debug!("loaded {} hazard zones from {path}", zones.len());
    Ok(zones)
}

fn read(path: &Utf8Path) -> Result<String, ZoneLoadError> {
    fs::read_to_string(path).map_err(|source| ZoneLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn features(text: &str) -> Result<Vec<Feature>, ZoneLoadError> {
    let document = text.parse::<GeoJson>().map_err(|source| ZoneLoadError::Parse {
        source: Box::new(source),
    })?;
    Ok(match document {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    })
}

const fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// First non-blank string property among `keys`.
fn label(properties: Option<&JsonObject>, keys: &[&str]) -> Option<String> {
    let props = properties?;
    keys.iter()
        .filter_map(|key| props.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}

fn coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn ring(positions: &[Vec<f64>]) -> Option<LineString<f64>> {
    positions
        .iter()
        .map(|position| coord(position))
        .collect::<Option<Vec<_>>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    let holes = interiors
        .iter()
        .map(|positions| ring(positions))
        .collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(ring(exterior)?, holes))
}
