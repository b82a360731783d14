//! Place entity.

pub mod model;

pub use model::{NewPlace, Place};
