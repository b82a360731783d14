//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use waypost_core::config::auth::AuthConfig;
use waypost_core::error::AppError;

use super::claims::Claims;

/// Validates session tokens.
///
/// This is the sole mechanism establishing acting identity: a token that
/// fails here never reaches the store. Malformed, tampered, and expired
/// tokens all map to `Unauthenticated` rather than a panic or a 500.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token string.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthenticated("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid token signature")
                    }
                    _ => AppError::unauthenticated("Token validation failed"),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;
    use waypost_core::error::ErrorKind;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_minutes: 60,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn issued_token_verifies() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let user_id = Uuid::new_v4();

        let issued = encoder.issue(user_id, "max@example.com").unwrap();
        let claims = decoder.verify(&issued.token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "max@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_rejected_valid_signature_or_not() {
        let cfg = config();
        let decoder = JwtDecoder::new(&cfg);
        let now = Utc::now().timestamp();

        // Properly signed but past its exp (beyond the 5 s leeway).
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "max@example.com".to_string(),
            iat: now - 3700,
            exp: now - 100,
        };
        let key = EncodingKey::from_secret(cfg.jwt_secret.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        let err = decoder.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn token_accepted_just_before_expiry() {
        let cfg = config();
        let decoder = JwtDecoder::new(&cfg);
        let now = Utc::now().timestamp();

        // One minute of lifetime left out of the hour.
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "max@example.com".to_string(),
            iat: now - 3540,
            exp: now + 60,
        };
        let key = EncodingKey::from_secret(cfg.jwt_secret.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert!(decoder.verify(&token).is_ok());
    }

    #[test]
    fn tampered_token_rejected() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);

        let wrong = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..config()
        };
        let decoder = JwtDecoder::new(&wrong);

        let issued = encoder.issue(Uuid::new_v4(), "max@example.com").unwrap();
        let err = decoder.verify(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn garbage_token_rejected() {
        let decoder = JwtDecoder::new(&config());
        let err = decoder.verify("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }
}
