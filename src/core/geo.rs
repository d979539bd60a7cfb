use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that the point lies within lat [-90, 90] and lng [-180, 180].
    ///
    /// Route sequencing does not call this; callers that receive coordinates
    /// from an untrusted provider can.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(PlannerError::InvalidArgument(format!(
                "latitude {} is outside [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(PlannerError::InvalidArgument(format!(
                "longitude {} is outside [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }
}

/// Great-circle distance in kilometers.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 0.001;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± 0.1%, got {actual}"
        );
    }

    #[test]
    fn one_degree_along_equator() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_close(haversine_km(&origin, &GeoPoint::new(0.0, 1.0)), 111.195);
        assert_close(haversine_km(&origin, &GeoPoint::new(0.0, 10.0)), 1111.95);
    }

    #[test]
    fn paris_to_london() {
        let paris = GeoPoint::new(48.8566, 2.3522);
        let london = GeoPoint::new(51.5074, -0.1278);
        assert_close(paris.distance_km(&london), 343.56);
    }

    #[test]
    fn symmetric_and_zero_on_self() {
        let points = [
            GeoPoint::new(19.076, 72.8777),
            GeoPoint::new(-33.8688, 151.2093),
            GeoPoint::new(40.7128, -74.006),
            GeoPoint::new(89.9, 179.9),
        ];
        for p in &points {
            assert_eq!(haversine_km(p, p), 0.0);
            for q in &points {
                assert!((haversine_km(p, q) - haversine_km(q, p)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn validate_ranges() {
        assert!(GeoPoint::new(90.0, -180.0).validate().is_ok());
        assert!(matches!(
            GeoPoint::new(90.5, 0.0).validate(),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(GeoPoint::new(0.0, 181.0).validate().is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
    }
}
