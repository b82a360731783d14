//! User signup, login, and listing.

pub mod service;

pub use service::{AuthPayload, SignupRequest, UserService};
