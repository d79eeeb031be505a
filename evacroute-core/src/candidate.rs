//! Safe-zone destinations and the routed candidates built from them.

use geo::Coord;

/// A destination the user can evacuate to.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use evacroute_core::SafeZone;
///
/// let zone = SafeZone::new(None, Coord { x: -78.44, y: -0.31 });
/// assert_eq!(zone.display_name(2), "Zone 3");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeZone {
    /// Label supplied by the zone listing, if any.
    pub name: Option<String>,
    /// Location of the zone.
    pub location: Coord<f64>,
}

impl SafeZone {
    /// Construct a safe zone.
    #[must_use]
    pub const fn new(name: Option<String>, location: Coord<f64>) -> Self {
        Self { name, location }
    }

    /// Construct a named safe zone.
    #[must_use]
    pub fn named(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self::new(Some(name.into()), location)
    }

    /// Return the label to display for the zone at `index` in its listing.
    #[must_use]
    pub fn display_name(&self, index: usize) -> String {
        zone_display_name(self.name.as_deref(), index)
    }
}

/// Resolve a zone label, synthesising `"Zone {index + 1}"` when absent.
///
/// Blank names count as absent.
///
/// # Examples
/// ```
/// use evacroute_core::zone_display_name;
///
/// assert_eq!(zone_display_name(Some("Coliseo"), 0), "Coliseo");
/// assert_eq!(zone_display_name(None, 0), "Zone 1");
/// ```
#[must_use]
pub fn zone_display_name(name: Option<&str>, index: usize) -> String {
    match name.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_owned(),
        _ => format!("Zone {}", index.saturating_add(1)),
    }
}

/// A safe zone paired with the walking route that reaches it.
///
/// Values come from the routing collaborator and are trusted: the scorer
/// does not validate ranges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Display label.
    pub name: String,
    /// Location of the destination zone.
    pub destination: Coord<f64>,
    /// Route geometry from origin to destination, `[lon, lat]` order.
    pub path: Vec<Coord<f64>>,
    /// Total path length in metres.
    pub distance_meters: f64,
    /// Estimated walking time in seconds.
    pub duration_seconds: f64,
}

impl Candidate {
    /// Construct a candidate from routed metrics.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use evacroute_core::Candidate;
    ///
    /// let path = vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.001, y: 0.0 }];
    /// let candidate = Candidate::new("Zone 1", Coord { x: 0.001, y: 0.0 }, path, 111.0, 80.0);
    /// assert_eq!(candidate.path.len(), 2);
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        destination: Coord<f64>,
        path: Vec<Coord<f64>>,
        distance_meters: f64,
        duration_seconds: f64,
    ) -> Self {
        Self {
            name: name.into(),
            destination,
            path,
            distance_meters,
            duration_seconds,
        }
    }
}
