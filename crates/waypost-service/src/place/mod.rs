//! Place operations and the cross-entity transaction coordinator.

pub mod service;

pub use service::{CreatePlaceRequest, PlaceService, UpdatePlaceRequest};
