//! Ownership guard for mutating place operations.

use uuid::Uuid;

use waypost_core::error::AppError;
use waypost_core::result::AppResult;

/// Fails with `Forbidden` unless the acting user created the resource.
///
/// Applied before update and delete of a place. Reads are intentionally
/// unauthenticated at this layer, so the guard never runs for them.
pub fn assert_owner(acting_user_id: Uuid, resource_creator_id: Uuid) -> AppResult<()> {
    if acting_user_id != resource_creator_id {
        return Err(AppError::forbidden(
            "You are not allowed to modify this place",
        ));
    }
    Ok(())
}
