//! Address-to-coordinates resolution seam.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::GeoPoint;

/// Resolves a free-form postal address to coordinates.
///
/// Place creation calls this before opening its transaction, so a failed
/// lookup aborts the operation with no writes. Implementations map
/// "address not found" to [`crate::error::ErrorKind::Geocode`], which the
/// API layer treats as a user-input problem rather than a system fault.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `address` to a coordinate pair.
    async fn resolve(&self, address: &str) -> AppResult<GeoPoint>;
}
