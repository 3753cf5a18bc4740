//! Geographic points in signed degrees.

use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Validated constructor. NaN fails both range checks.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }
}

/// Wraps any longitude into `[-180, 180)`.
pub fn wrap_longitude_deg(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Signed longitude change from `from` to `to` along the shorter arc.
pub fn shortest_longitude_delta_deg(from: f64, to: f64) -> f64 {
    wrap_longitude_deg(to - from)
}
