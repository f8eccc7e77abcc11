//! # Geographic Value Types
//!
//! WGS84 coordinates with validated construction. A `Coordinate` that
//! exists is always finite and inside the valid latitude/longitude ranges,
//! so downstream geometry never has to re-check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated WGS84 coordinate pair, in decimal degrees.
///
/// Construction via [`Coordinate::new`] enforces range and finiteness;
/// deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// Unvalidated serde mirror of [`Coordinate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite values and out-of-range
    /// degrees. Latitude must lie in [-90, 90], longitude in [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange(lng));
        }
        Ok(Coordinate { lat, lng })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        RawCoordinate { lat: c.lat, lng: c.lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Rejections produced by [`Coordinate::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude outside [-90, 90].
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180].
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// NaN or infinite component.
    #[error("coordinate components must be finite")]
    NotFinite,
}
