//! Shared domain value types.

pub mod geo;

pub use geo::GeoPoint;
