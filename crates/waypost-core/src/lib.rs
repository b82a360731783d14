//! # waypost-core
//!
//! Core crate for Waypost. Contains the unified error system, configuration
//! schemas, shared domain types, and the traits that decouple the business
//! logic from external collaborators (geocoding).
//!
//! This crate has **no** internal dependencies on other Waypost crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
