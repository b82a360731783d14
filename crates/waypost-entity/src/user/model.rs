//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address. Unique, matched case-sensitively.
    pub email: String,
    /// Path to the user's avatar image.
    pub image: String,
    /// Argon2 password hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Ids of the places this user owns, in creation order.
    ///
    /// Redundant with `Place.creator`; the place service keeps both sides
    /// in step inside one transaction.
    pub place_ids: Vec<Uuid>,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this user owns the given place id.
    pub fn owns(&self, place_id: Uuid) -> bool {
        self.place_ids.contains(&place_id)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar image path.
    pub image: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Max".to_string(),
            email: "max@example.com".to_string(),
            image: "uploads/images/max.png".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            place_ids: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "max@example.com");
    }

    #[test]
    fn owns_checks_place_list() {
        let mut user = sample_user();
        let place_id = Uuid::new_v4();
        assert!(!user.owns(place_id));
        user.place_ids.push(place_id);
        assert!(user.owns(place_id));
    }
}
