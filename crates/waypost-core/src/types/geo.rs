//! Geographic coordinate pair.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair as returned by the geocoding collaborator.
///
/// Assigned once when a place is created; places never move afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_lat_lng_object() {
        let point = GeoPoint::new(40.7484, -73.9857);
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["lat"], 40.7484);
        assert_eq!(json["lng"], -73.9857);
    }
}
