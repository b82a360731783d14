//! # waypost-storage
//!
//! Local filesystem store for uploaded place and avatar images.
//!
//! Upload handling itself is outside the core; handlers receive the
//! stored path as a string. This crate exists for the two unwind paths:
//! deleting a place's image after the delete transaction commits, and
//! removing an orphaned upload when place creation fails.

pub mod local;

pub use local::ImageStore;
