//! Coordinates and proximity search
//!
//! This module handles:
//! - The latitude/longitude point type and its range validation
//! - Haversine distance between points
//! - Radius and pairwise proximity searches over a snapshot of points

pub mod distance;

use crate::constants::geo::{LAT_RANGE, LON_RANGE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    ///
    /// NaN fails both checks.
    pub fn validate(&self) -> Result<()> {
        if !LAT_RANGE.contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !LON_RANGE.contains(&self.lon) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }

    /// Exact floating-point equality of both components
    pub fn same_as(&self, other: &Coordinates) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Anything with a position on the globe
///
/// The proximity searches in [`distance`] work over slices of any `Located`
/// item, so they can return stored records rather than bare points.
pub trait Located {
    fn coordinates(&self) -> Coordinates;
}

impl Located for Coordinates {
    fn coordinates(&self) -> Coordinates {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, -180.0).validate().is_ok());
        assert!(Coordinates::new(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_latitude() {
        let err = Coordinates::new(90.5, 0.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinates(_)));
        assert!(err.to_string().contains("Latitude"));
    }

    #[test]
    fn test_validate_rejects_longitude() {
        let err = Coordinates::new(0.0, -180.1).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinates(_)));
        assert!(err.to_string().contains("Longitude"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_same_as_is_exact() {
        let a = Coordinates::new(52.52, 13.405);
        assert!(a.same_as(&Coordinates::new(52.52, 13.405)));
        assert!(!a.same_as(&Coordinates::new(52.52, 13.405 + 1e-12)));
    }
}
