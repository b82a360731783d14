//! Place repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use waypost_core::error::{AppError, ErrorKind};
use waypost_core::result::AppResult;
use waypost_entity::place::{NewPlace, Place};

/// Repository for place CRUD and query operations.
///
/// Insert and delete are transaction-scoped: a place row never appears or
/// disappears outside the paired mutation of its owner's list, so both
/// methods take the caller's transaction connection.
#[derive(Debug, Clone)]
pub struct PlaceRepository {
    pool: PgPool,
}

impl PlaceRepository {
    /// Create a new place repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a place by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Place>> {
        sqlx::query_as::<_, Place>("SELECT * FROM places WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find place by id", e)
            })
    }

    /// List the places created by one user, oldest first. Empty if none.
    pub async fn find_by_creator(&self, user_id: Uuid) -> AppResult<Vec<Place>> {
        sqlx::query_as::<_, Place>(
            "SELECT * FROM places WHERE creator = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list places by creator", e)
        })
    }

    /// Overwrite the two mutable text fields. Returns the updated place,
    /// or `None` if no such row exists.
    pub async fn update_text(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Place>> {
        sqlx::query_as::<_, Place>(
            "UPDATE places SET title = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update place", e))
    }

    /// Insert a new place inside the caller's transaction.
    pub async fn insert(&self, conn: &mut PgConnection, data: &NewPlace) -> AppResult<Place> {
        sqlx::query_as::<_, Place>(
            "INSERT INTO places (title, description, address, lat, lng, image, creator) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.address)
        .bind(data.location.lat)
        .bind(data.location.lng)
        .bind(&data.image)
        .bind(data.creator)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert place", e))
    }

    /// Delete a place inside the caller's transaction, returning the
    /// deleted snapshot (the service needs its creator and image path
    /// for the paired detach and the file cleanup).
    pub async fn delete(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Place>> {
        sqlx::query_as::<_, Place>("DELETE FROM places WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete place", e))
    }
}
