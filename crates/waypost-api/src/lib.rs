//! # waypost-api
//!
//! HTTP layer for Waypost: the Axum router, handlers, DTOs, the bearer
//! token extractor, and the mapping from `AppError` to HTTP responses.
//!
//! Handlers resolve the acting identity up front (the `AuthUser`
//! extractor rejects requests before any store access) and pass it
//! explicitly into the services.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
