//! Repository implementations, one per entity.

pub mod place;
pub mod user;

pub use place::PlaceRepository;
pub use user::UserRepository;
