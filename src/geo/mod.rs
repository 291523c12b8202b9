//! Great-circle distance on a spherical Earth
//!
//! Coordinates are validated once at construction, so every `Coordinate`
//! reaching [`distance`] is known to be in range and the result is always
//! finite and non-negative.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

/// Wire form, range-checked before a `Coordinate` exists
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite values
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::invalid_argument(format!(
                "latitude must be between -90 and 90 degrees, got {}",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(Error::invalid_argument(format!(
                "longitude must be between -180 and 180 degrees, got {}",
                lon
            )));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another coordinate in kilometers
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance(*self, *other)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawCoordinate::deserialize(deserializer)?;
        Coordinate::new(raw.lat, raw.lon).map_err(serde::de::Error::custom)
    }
}

/// Haversine distance between two coordinates in kilometers
///
/// Near antipodal points the haversine term is within an ulp of 1, which
/// limits precision there to roughly a metre.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // rounding can push h slightly past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.01),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = coord(20.2376, 85.8346);
        assert!(distance(p, p).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        for (a, b) in [
            (coord(10.0, 20.0), coord(-10.0, -160.0)),
            (coord(45.5, -73.6), coord(-45.5, 106.4)),
            (coord(0.0, 0.0), coord(0.0, 180.0)),
        ] {
            let d = distance(a, b);
            assert!(d.is_finite());
            assert!((d - half).abs() < 1e-3, "got {d} km, expected {half}");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate = serde_json::from_str(r#"{"lat": 20.0, "lon": 85.0}"#).unwrap();
        assert_eq!(ok.lat(), 20.0);
        assert_eq!(ok.lon(), 85.0);

        let bad = serde_json::from_str::<Coordinate>(r#"{"lat": 120.0, "lon": 85.0}"#);
        let err = bad.unwrap_err().to_string();
        assert!(err.contains("latitude"), "unexpected error: {err}");
    }
}
