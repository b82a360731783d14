//! User signup and login flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use waypost_auth::jwt::JwtEncoder;
use waypost_auth::password::PasswordHasher;
use waypost_core::error::AppError;
use waypost_core::result::AppResult;
use waypost_database::repositories::UserRepository;
use waypost_entity::user::{NewUser, User};
use waypost_storage::ImageStore;

/// Handles signup, login, and the public user listing.
#[derive(Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session token issuer.
    encoder: Arc<JwtEncoder>,
    /// Image store, for unwinding an avatar upload on failed signup.
    images: Arc<ImageStore>,
    /// Minimum accepted password length.
    password_min_length: usize,
}

/// Data for a signup attempt. The avatar is already uploaded; `image`
/// is the stored path.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Raw password. Hashed here, never stored or logged.
    pub password: String,
    /// Stored avatar path.
    pub image: String,
}

/// Result of a successful signup or login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthPayload {
    /// The authenticated user's id.
    pub user_id: Uuid,
    /// The authenticated user's email.
    pub email: String,
    /// Signed session token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        images: Arc<ImageStore>,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            images,
            password_min_length,
        }
    }

    /// Registers a new user and issues their first session token.
    ///
    /// Any failure unwinds the already-uploaded avatar, since no user row
    /// will exist to reference it.
    pub async fn signup(&self, req: SignupRequest) -> AppResult<AuthPayload> {
        let result = self.signup_inner(&req).await;
        if result.is_err() && !req.image.is_empty() {
            self.images.remove_best_effort(&req.image).await;
        }
        result
    }

    async fn signup_inner(&self, req: &SignupRequest) -> AppResult<AuthPayload> {
        if req.password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Cannot create user. User already exists"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;

        // The email unique index still backstops a concurrent signup that
        // slipped past the lookup above; the repository maps that to the
        // same Conflict.
        let user = self
            .user_repo
            .create(&NewUser {
                name: req.name.clone(),
                email: req.email.clone(),
                image: req.image.clone(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User signed up");

        self.issue_payload(&user)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthPayload> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::forbidden("Invalid credentials"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::forbidden("Invalid credentials"));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_payload(&user)
    }

    /// Lists all users. Password hashes never serialize, so the listing
    /// is safe to return as-is.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all().await
    }

    fn issue_payload(&self, user: &User) -> AppResult<AuthPayload> {
        let session = self.encoder.issue(user.id, &user.email)?;
        Ok(AuthPayload {
            user_id: user.id,
            email: user.email.clone(),
            token: session.token,
            expires_at: session.expires_at,
        })
    }
}
