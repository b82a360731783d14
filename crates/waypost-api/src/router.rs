//! Route definitions for the Waypost HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(place_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Place routes: public reads, owner-guarded mutations.
fn place_routes() -> Router<AppState> {
    Router::new()
        .route("/places/user/{uid}", get(handlers::place::get_places_by_user))
        .route("/places/{id}", get(handlers::place::get_place))
        .route("/places", post(handlers::place::create_place))
        .route("/places/{id}", patch(handlers::place::update_place))
        .route("/places/{id}", delete(handlers::place::delete_place))
}

/// User routes: listing, signup, login.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/signup", post(handlers::user::signup))
        .route("/users/login", post(handlers::user::login))
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
