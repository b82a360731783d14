//! # waypost-database
//!
//! PostgreSQL access for Waypost: the connection pool, the migration
//! runner, and the per-entity repositories.
//!
//! Repositories are single-entity by design. Cross-entity consistency
//! (a place and its owner's reverse list) is the place service's job;
//! repositories only offer transaction-scoped primitives for it.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
