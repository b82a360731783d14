//! # waypost-auth
//!
//! Authentication building blocks: Argon2id password hashing, signed
//! session tokens (JWT), and the ownership guard applied before mutating
//! a place.
//!
//! There is deliberately no server-side session store. A verified token is
//! the sole source of acting identity, and expiry is the only way a
//! session ends.

pub mod jwt;
pub mod ownership;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use ownership::assert_owner;
pub use password::PasswordHasher;
