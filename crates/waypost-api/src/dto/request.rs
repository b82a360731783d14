//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use waypost_core::error::AppError;

/// Map a validation failure to the API's 422 contract.
pub fn check<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|_| AppError::validation("Invalid inputs passed, please check your data"))
}

/// Signup request body. `image` is the stored avatar path produced by
/// the upload collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Stored avatar image path.
    #[serde(default)]
    pub image: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create place request body. `image` is the stored image path produced
/// by the upload collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    /// Short title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Free-form description.
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: String,
    /// Postal address to geocode.
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    /// Stored place image path.
    #[serde(default)]
    pub image: String,
}

/// Update place request body. Only the two mutable text fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    /// New title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// New description.
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypost_core::error::ErrorKind;

    #[test]
    fn short_description_fails_validation() {
        let body = CreatePlaceRequest {
            title: "A place".to_string(),
            description: "nope".to_string(),
            address: "somewhere".to_string(),
            image: String::new(),
        };
        let err = check(&body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn valid_signup_passes() {
        let body = SignupRequest {
            name: "Max".to_string(),
            email: "max@example.com".to_string(),
            password: "hunter2!".to_string(),
            image: String::new(),
        };
        assert!(check(&body).is_ok());
    }

    #[test]
    fn bad_email_fails_validation() {
        let body = SignupRequest {
            name: "Max".to_string(),
            email: "not-an-email".to_string(),
            password: "hunter2!".to_string(),
            image: String::new(),
        };
        assert!(check(&body).is_err());
    }
}
