//! # waypost-service
//!
//! Business logic for Waypost. `UserService` covers signup, login, and
//! the public user listing. `PlaceService` is the transaction coordinator:
//! the only code path allowed to mutate both a place row and its owner's
//! reverse list, and it only ever does so inside one database transaction.

pub mod context;
pub mod place;
pub mod user;

pub use context::RequestContext;
pub use place::PlaceService;
pub use user::UserService;
