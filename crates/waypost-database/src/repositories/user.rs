//! User repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use waypost_core::error::{AppError, ErrorKind};
use waypost_core::result::AppResult;
use waypost_entity::user::{NewUser, User};

/// Repository for user CRUD and query operations.
///
/// Every method here is single-row atomic. The owned-places list mutations
/// (`attach_place`, `detach_place`) run against a caller-supplied
/// transaction connection so the place service can pair them with the
/// matching place insert/delete.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email. Matching is case-sensitive; the unique index
    /// is on the raw column.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// List all users, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Create a new user with an empty owned-places list.
    pub async fn create(&self, data: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, image, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.image)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(format!("Email '{}' is already registered", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Append a place id to the owner's list, inside the caller's
    /// transaction.
    ///
    /// The append happens in SQL (`array_append`), not as a read-modify-write
    /// of a list fetched outside the transaction, so two concurrent creates
    /// for the same user cannot lose each other's id.
    pub async fn attach_place(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        place_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users \
             SET place_ids = array_append(place_ids, $2), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(place_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach place", e))?;

        if result.rows_affected() != 1 {
            return Err(AppError::database(format!(
                "Owner {user_id} missing while attaching place"
            )));
        }
        Ok(())
    }

    /// Remove a place id from the owner's list, inside the caller's
    /// transaction.
    pub async fn detach_place(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        place_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users \
             SET place_ids = array_remove(place_ids, $2), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(place_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to detach place", e))?;

        if result.rows_affected() != 1 {
            return Err(AppError::database(format!(
                "Owner {user_id} missing while detaching place"
            )));
        }
        Ok(())
    }
}
