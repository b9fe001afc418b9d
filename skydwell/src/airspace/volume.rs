//! Airspace volumes and the membership predicate.

use serde::Serialize;

use crate::config::ConfigurationError;
use crate::geo::{Polygon, Position};

/// Vertical limits of an airspace volume, in feet.
///
/// Membership is half-open below: `lower_ft < altitude <= upper_ft`. Stacked
/// volumes sharing a limit therefore never both claim a sample sitting
/// exactly on that limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerticalBand {
    /// Lower limit (exclusive).
    pub lower_ft: f64,
    /// Upper limit (inclusive).
    pub upper_ft: f64,
}

impl VerticalBand {
    /// Whether an altitude falls within the band.
    #[inline]
    pub fn contains(&self, altitude_ft: f64) -> bool {
        self.lower_ft < altitude_ft && altitude_ft <= self.upper_ft
    }
}

impl std::fmt::Display for VerticalBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} - {:.0} ft", self.lower_ft, self.upper_ft)
    }
}

/// A named 3-D airspace region: a vertical band over a horizontal polygon.
///
/// Volumes are static configuration. They are validated once on construction
/// and shared read-only across every flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirspaceVolume {
    name: String,
    band: VerticalBand,
    polygon: Polygon,
}

impl AirspaceVolume {
    /// Create a volume from its name, vertical limits and polygon vertices.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the name is empty, the band is empty
    /// or inverted, or the polygon has fewer than three distinct vertices.
    pub fn new(
        name: impl Into<String>,
        lower_ft: f64,
        upper_ft: f64,
        vertices: Vec<Position>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyName);
        }

        if !lower_ft.is_finite() || !upper_ft.is_finite() || lower_ft >= upper_ft {
            return Err(ConfigurationError::InvertedBand {
                volume: name,
                lower_ft,
                upper_ft,
            });
        }

        let polygon = Polygon::new(vertices).map_err(|source| ConfigurationError::InvalidPolygon {
            volume: name.clone(),
            source,
        })?;

        Ok(Self {
            name,
            band: VerticalBand { lower_ft, upper_ft },
            polygon,
        })
    }

    /// Volume name (used as the metric key prefix).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertical limits.
    pub fn band(&self) -> VerticalBand {
        self.band
    }

    /// Horizontal limits.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Whether a position at the given altitude lies inside this volume.
    ///
    /// The horizontal test is boundary-inclusive; the vertical test is
    /// `lower < altitude <= upper`.
    pub fn contains(&self, position: Position, altitude_ft: f64) -> bool {
        self.band.contains(altitude_ft) && self.polygon.contains(position)
    }
}

/// Membership predicate: whether `position` at `altitude_ft` is inside `volume`.
pub fn is_inside(position: Position, altitude_ft: f64, volume: &AirspaceVolume) -> bool {
    volume.contains(position, altitude_ft)
}
