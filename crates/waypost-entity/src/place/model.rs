//! Place entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use waypost_core::types::GeoPoint;

/// A point of interest registered by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    /// Unique place identifier, assigned by the store.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Postal address as entered by the user. Only used as geocoding input.
    pub address: String,
    /// Latitude assigned at creation from the geocoding result. Immutable.
    pub lat: f64,
    /// Longitude assigned at creation from the geocoding result. Immutable.
    pub lng: f64,
    /// Path to the stored place image. Immutable.
    pub image: String,
    /// Id of the owning user. Set at creation, never reassigned.
    pub creator: Uuid,
    /// When the place was created.
    pub created_at: DateTime<Utc>,
    /// When the mutable text fields were last updated.
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// The place's coordinates as a value pair.
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Data required to create a new place. Coordinates are already resolved;
/// the repository never calls out to the geocoder itself.
#[derive(Debug, Clone)]
pub struct NewPlace {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Postal address.
    pub address: String,
    /// Resolved coordinates.
    pub location: GeoPoint,
    /// Stored image path.
    pub image: String,
    /// Owning user id.
    pub creator: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_mirrors_columns() {
        let place = Place {
            id: Uuid::new_v4(),
            title: "Empire State Building".to_string(),
            description: "A famous skyscraper".to_string(),
            address: "20 W 34th St, New York, NY 10001".to_string(),
            lat: 40.7484,
            lng: -73.9857,
            image: "uploads/images/esb.jpg".to_string(),
            creator: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let loc = place.location();
        assert_eq!(loc.lat, 40.7484);
        assert_eq!(loc.lng, -73.9857);
    }
}
