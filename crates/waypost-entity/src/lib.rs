//! # waypost-entity
//!
//! Domain entity models for Waypost: users and the places they own.
//!
//! A place points at its creator (`Place.creator`) and the creator carries
//! the reverse list (`User.place_ids`). The two are deliberately kept as
//! id-based back-references rather than in-memory object links; only the
//! place service's paired transaction is allowed to touch both sides.

pub mod place;
pub mod user;

pub use place::Place;
pub use user::User;
