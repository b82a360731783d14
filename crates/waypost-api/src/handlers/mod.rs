//! HTTP handlers, grouped by resource.

pub mod health;
pub mod place;
pub mod user;
