//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use waypost_auth::jwt::JwtDecoder;
use waypost_core::config::AppConfig;
use waypost_service::place::PlaceService;
use waypost_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Session token verifier.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Signup/login/listing service.
    pub user_service: Arc<UserService>,
    /// Place service (the transaction coordinator).
    pub place_service: Arc<PlaceService>,
}
