//! Geographic value types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bare latitude/longitude pair, as attached to a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("accuracy {0} must be non-negative")]
    NegativeAccuracy(f64),
}

/// A device position with capture metadata.
///
/// Owned by the geolocation session and replaced wholesale on each new fix,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated accuracy radius in meters.
    pub accuracy_m: f64,
    pub captured_at: DateTime<Utc>,
    /// True when the position came from network-level signals rather than a
    /// device fix. Downstream display must never present these as precise.
    pub is_approximate: bool,
    pub city_label: Option<String>,
}

impl Coordinate {
    /// Build a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateError` when latitude/longitude fall outside their
    /// valid ranges or accuracy is negative.
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy_m: f64,
        captured_at: DateTime<Utc>,
        is_approximate: bool,
        city_label: Option<String>,
    ) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        if accuracy_m < 0.0 {
            return Err(CoordinateError::NegativeAccuracy(accuracy_m));
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy_m,
            captured_at,
            is_approximate,
            city_label,
        })
    }

    /// The bare point, for distance math.
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lat: f64, lng: f64, accuracy: f64) -> Result<Coordinate, CoordinateError> {
        Coordinate::new(lat, lng, accuracy, Utc::now(), false, None)
    }

    #[test]
    fn accepts_boundary_latitudes_and_longitudes() {
        assert!(build(90.0, 180.0, 0.0).is_ok());
        assert!(build(-90.0, -180.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        let err = build(90.1, 0.0, 5.0).unwrap_err();
        assert!(matches!(err, CoordinateError::LatitudeOutOfRange(_)));
    }

    #[test]
    fn rejects_longitude_out_of_range() {
        let err = build(0.0, -180.5, 5.0).unwrap_err();
        assert!(matches!(err, CoordinateError::LongitudeOutOfRange(_)));
    }

    #[test]
    fn rejects_negative_accuracy() {
        let err = build(18.0, -76.8, -1.0).unwrap_err();
        assert!(matches!(err, CoordinateError::NegativeAccuracy(_)));
    }

    #[test]
    fn point_projects_lat_lng() {
        let coord = build(17.997, -76.7936, 20.0).unwrap();
        let point = coord.point();
        assert!((point.lat - 17.997).abs() < f64::EPSILON);
        assert!((point.lng - (-76.7936)).abs() < f64::EPSILON);
    }
}
