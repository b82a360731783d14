//! User handlers: signup, login, and the public listing.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use waypost_service::user as user_service;

use crate::dto::request::{self, LoginRequest, SignupRequest};
use crate::dto::response::{AuthResponse, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/users/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request::check(&body)?;

    let payload = state
        .user_service
        .signup(user_service::SignupRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            image: body.image,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(auth_response(payload))))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request::check(&body)?;

    let payload = state.user_service.login(&body.email, &body.password).await?;

    Ok(Json(auth_response(payload)))
}

fn auth_response(payload: user_service::AuthPayload) -> AuthResponse {
    AuthResponse {
        user_id: payload.user_id,
        email: payload.email,
        token: payload.token,
        expires_at: payload.expires_at,
    }
}
