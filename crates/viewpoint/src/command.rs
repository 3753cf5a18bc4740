use foundation::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// "Move the camera to (lat, lng, altitude) over `duration_ms`."
///
/// Altitude is expressed in globe radii above the surface, so `1.0` puts the
/// eye one Earth radius up.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfView {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
    pub duration_ms: u32,
}

impl PointOfView {
    pub fn new(center: GeoPoint, altitude: f64, duration_ms: u32) -> Self {
        Self {
            lat: center.lat,
            lng: center.lng,
            altitude,
            duration_ms,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

#[cfg(test)]
mod tests {
    use super::PointOfView;
    use foundation::geo::GeoPoint;

    #[test]
    fn serializes_in_camel_case() {
        let pov = PointOfView::new(GeoPoint { lat: 20.0, lng: 0.0 }, 2.0, 2000);
        let json = serde_json::to_string(&pov).expect("json");
        assert_eq!(json, r#"{"lat":20.0,"lng":0.0,"altitude":2.0,"durationMs":2000}"#);
        assert!(!pov.is_instant());
    }
}
