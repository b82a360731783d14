//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waypost_core::types::GeoPoint;
use waypost_entity::place::Place;
use waypost_entity::user::User;

/// Place representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResponse {
    /// Place id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Address as entered.
    pub address: String,
    /// Coordinates.
    pub location: GeoPoint,
    /// Stored image path.
    pub image: String,
    /// Owning user id.
    pub creator: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            title: place.title.clone(),
            description: place.description.clone(),
            address: place.address.clone(),
            location: place.location(),
            image: place.image,
            creator: place.creator,
            created_at: place.created_at,
        }
    }
}

/// User summary for the public listing. No credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar image path.
    pub image: String,
    /// Ids of the places this user owns.
    pub place_ids: Vec<Uuid>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            place_ids: user.place_ids,
        }
    }
}

/// Successful signup/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user's id.
    pub user_id: Uuid,
    /// The authenticated user's email.
    pub email: String,
    /// Signed session token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_response_nests_location() {
        let place = Place {
            id: Uuid::new_v4(),
            title: "Empire State Building".to_string(),
            description: "A famous skyscraper".to_string(),
            address: "20 W 34th St".to_string(),
            lat: 40.7484,
            lng: -73.9857,
            image: "uploads/images/esb.jpg".to_string(),
            creator: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(PlaceResponse::from(place)).unwrap();
        assert_eq!(json["location"]["lat"], 40.7484);
        assert_eq!(json["location"]["lng"], -73.9857);
    }

    #[test]
    fn user_response_has_no_credential_fields() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Max".to_string(),
            email: "max@example.com".to_string(),
            image: String::new(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            place_ids: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }
}
