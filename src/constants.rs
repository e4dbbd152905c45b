//! Centralized constants for the geo-addresses crate
//!
//! Values shared by the coordinate validation and the distance engine.

/// Geographic constants
pub mod geo {
    use std::ops::RangeInclusive;

    /// Mean Earth radius in kilometers used by the haversine formula
    ///
    /// Fixed spherical approximation, not the WGS84 ellipsoid.
    pub const EARTH_RADIUS_KM: f64 = 6373.0;

    /// Valid latitude range in degrees
    pub const LAT_RANGE: RangeInclusive<f64> = -90.0..=90.0;

    /// Valid longitude range in degrees
    pub const LON_RANGE: RangeInclusive<f64> = -180.0..=180.0;
}
