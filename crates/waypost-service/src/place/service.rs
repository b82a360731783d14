//! The place transaction coordinator.
//!
//! The place/owner relationship is encoded twice: a forward pointer on the
//! place (`creator`) and a reverse list on the user (`place_ids`). That
//! redundancy buys O(1) ownership checks and per-user listing without a
//! cross-table scan, and this service is the single choke point that keeps
//! the two sides consistent. Create and delete each run as one database
//! transaction; every other write path in the repository is single-row.

use std::sync::Arc;

use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, info};
use uuid::Uuid;

use waypost_auth::ownership::assert_owner;
use waypost_core::error::{AppError, ErrorKind};
use waypost_core::result::AppResult;
use waypost_core::traits::Geocoder;
use waypost_database::repositories::{PlaceRepository, UserRepository};
use waypost_entity::place::{NewPlace, Place};
use waypost_storage::ImageStore;

/// Coordinates place mutations and their paired owner-list updates.
#[derive(Clone)]
pub struct PlaceService {
    /// Pool used to open the paired-write transactions.
    pool: PgPool,
    /// Place repository.
    place_repo: Arc<PlaceRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Address resolution collaborator.
    geocoder: Arc<dyn Geocoder>,
    /// Image store for cleanup paths.
    images: Arc<ImageStore>,
}

/// Data for creating a place. The image is already uploaded; `image` is
/// the stored path.
#[derive(Debug, Clone)]
pub struct CreatePlaceRequest {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Postal address, resolved to coordinates before any write.
    pub address: String,
    /// Stored image path.
    pub image: String,
}

/// Data for updating a place's mutable text fields.
#[derive(Debug, Clone)]
pub struct UpdatePlaceRequest {
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
}

impl PlaceService {
    /// Creates a new place service.
    pub fn new(
        pool: PgPool,
        place_repo: Arc<PlaceRepository>,
        user_repo: Arc<UserRepository>,
        geocoder: Arc<dyn Geocoder>,
        images: Arc<ImageStore>,
    ) -> Self {
        Self {
            pool,
            place_repo,
            user_repo,
            geocoder,
            images,
        }
    }

    /// Looks up a single place.
    pub async fn get_place(&self, place_id: Uuid) -> AppResult<Place> {
        self.place_repo
            .find_by_id(place_id)
            .await?
            .ok_or_else(|| AppError::not_found("Could not find a place for the provided id"))
    }

    /// Lists the places created by one user. Empty if none.
    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Place>> {
        self.place_repo.find_by_creator(user_id).await
    }

    /// Creates a place owned by `user_id`, appending its id to the owner's
    /// list in the same transaction.
    ///
    /// Any caller-visible failure unwinds the already-uploaded image, since
    /// no place row will exist to reference it.
    pub async fn create_place(
        &self,
        user_id: Uuid,
        req: CreatePlaceRequest,
    ) -> AppResult<Place> {
        let result = self.create_place_inner(user_id, &req).await;
        if result.is_err() && !req.image.is_empty() {
            self.images.remove_best_effort(&req.image).await;
        }
        result
    }

    async fn create_place_inner(
        &self,
        user_id: Uuid,
        req: &CreatePlaceRequest,
    ) -> AppResult<Place> {
        // Resolve coordinates first: a bad address aborts before any write.
        let location = self.geocoder.resolve(&req.address).await?;

        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("Could not find user for provided id"));
        }

        let data = NewPlace {
            title: req.title.clone(),
            description: req.description.clone(),
            address: req.address.clone(),
            location,
            image: req.image.clone(),
            creator: user_id,
        };

        let mut tx = self.begin().await?;
        match self.run_create_unit(&mut tx, &data).await {
            Ok(place) => {
                tx.commit()
                    .await
                    .map_err(|e| abort_error("Place creation aborted at commit", e))?;
                info!(place_id = %place.id, creator = %user_id, "Place created");
                Ok(place)
            }
            Err(e) => Err(self.abort(tx, "Place creation aborted", e).await),
        }
    }

    async fn run_create_unit(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        data: &NewPlace,
    ) -> AppResult<Place> {
        let place = self.place_repo.insert(&mut **tx, data).await?;
        self.user_repo
            .attach_place(&mut **tx, data.creator, place.id)
            .await?;
        Ok(place)
    }

    /// Updates a place's title and description. Requires ownership; never
    /// touches the relationship, so no transaction is needed.
    pub async fn update_place(
        &self,
        acting_user_id: Uuid,
        place_id: Uuid,
        req: UpdatePlaceRequest,
    ) -> AppResult<Place> {
        let place = self.get_place(place_id).await?;
        assert_owner(acting_user_id, place.creator)?;

        self.place_repo
            .update_text(place_id, &req.title, &req.description)
            .await?
            .ok_or_else(|| AppError::not_found("Could not find a place for the provided id"))
    }

    /// Deletes a place and removes its id from the owner's list in the
    /// same transaction, then best-effort deletes the stored image.
    pub async fn delete_place(&self, acting_user_id: Uuid, place_id: Uuid) -> AppResult<()> {
        let place = self.get_place(place_id).await?;
        assert_owner(acting_user_id, place.creator)?;

        let mut tx = self.begin().await?;
        let deleted = match self.run_delete_unit(&mut tx, place_id).await {
            Ok(deleted) => {
                tx.commit()
                    .await
                    .map_err(|e| abort_error("Place deletion aborted at commit", e))?;
                deleted
            }
            Err(e) => return Err(self.abort(tx, "Place deletion aborted", e).await),
        };

        info!(place_id = %place_id, creator = %deleted.creator, "Place deleted");

        // The store is already consistent; losing the file is only worth a
        // warning.
        if !deleted.image.is_empty() {
            self.images.remove_best_effort(&deleted.image).await;
        }
        Ok(())
    }

    async fn run_delete_unit(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        place_id: Uuid,
    ) -> AppResult<Place> {
        let deleted = self
            .place_repo
            .delete(&mut **tx, place_id)
            .await?
            .ok_or_else(|| AppError::not_found("No place with such id"))?;
        self.user_repo
            .detach_place(&mut **tx, deleted.creator, place_id)
            .await?;
        Ok(deleted)
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Rolls the transaction back and maps the failure to `Consistency`:
    /// neither the place nor the owner list changed.
    async fn abort(
        &self,
        tx: Transaction<'static, Postgres>,
        message: &str,
        cause: AppError,
    ) -> AppError {
        if let Err(e) = tx.rollback().await {
            error!(error = %e, "Transaction rollback failed");
        }
        // NotFound from inside the unit is a caller error, not an abort.
        if cause.kind == ErrorKind::NotFound {
            return cause;
        }
        abort_error(message, cause)
    }
}

fn abort_error(message: &str, cause: impl std::error::Error + Send + Sync + 'static) -> AppError {
    error!(error = %cause, "{message}");
    AppError::with_source(ErrorKind::Consistency, message, cause)
}

#[cfg(test)]
mod tests {
    //! Coordinator invariant tests that need a live PostgreSQL. Run with
    //! `DATABASE_URL=... cargo test -- --ignored`.

    use super::*;
    use async_trait::async_trait;
    use waypost_core::config::auth::AuthConfig;
    use waypost_core::config::database::DatabaseConfig;
    use waypost_core::types::GeoPoint;
    use waypost_entity::user::NewUser;

    /// Geocoder that always resolves to a fixed point.
    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, _address: &str) -> AppResult<GeoPoint> {
            Ok(GeoPoint::new(40.7484, -73.9857))
        }
    }

    /// Geocoder that always fails, for the no-writes-on-geocode-failure path.
    struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn resolve(&self, _address: &str) -> AppResult<GeoPoint> {
            Err(AppError::geocode("Could not find the location"))
        }
    }

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let config = DatabaseConfig {
            url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
        };
        let pool = waypost_database::DatabasePool::connect(&config)
            .await
            .expect("connect")
            .into_pool();
        waypost_database::migration::run_migrations(&pool)
            .await
            .expect("migrate");
        pool
    }

    async fn service(pool: PgPool, geocoder: Arc<dyn Geocoder>) -> PlaceService {
        let dir = std::env::temp_dir().join("waypost-service-tests");
        let images = Arc::new(ImageStore::new(dir.to_str().unwrap()).await.unwrap());
        PlaceService::new(
            pool.clone(),
            Arc::new(PlaceRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool)),
            geocoder,
            images,
        )
    }

    async fn signup(pool: &PgPool, tag: &str) -> Uuid {
        let repo = UserRepository::new(pool.clone());
        let hasher = waypost_auth::password::PasswordHasher::new(&AuthConfig {
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..AuthConfig::default()
        })
        .unwrap();
        repo.create(&NewUser {
            name: format!("user-{tag}"),
            email: format!("{tag}-{}@example.com", Uuid::new_v4()),
            image: String::new(),
            password_hash: hasher.hash_password("hunter2!").unwrap(),
        })
        .await
        .expect("signup")
        .id
    }

    fn place_req(title: &str) -> CreatePlaceRequest {
        CreatePlaceRequest {
            title: title.to_string(),
            description: "somewhere worth seeing".to_string(),
            address: "20 W 34th St, New York".to_string(),
            image: String::new(),
        }
    }

    async fn owned_ids(pool: &PgPool, user_id: Uuid) -> Vec<Uuid> {
        UserRepository::new(pool.clone())
            .find_by_id(user_id)
            .await
            .expect("load user")
            .expect("user exists")
            .place_ids
    }

    #[tokio::test]
    #[ignore]
    async fn create_keeps_both_sides_consistent() {
        let pool = test_pool().await;
        let svc = service(pool.clone(), Arc::new(FixedGeocoder)).await;
        let user_id = signup(&pool, "consistent").await;

        let place = svc.create_place(user_id, place_req("Empire State")).await.unwrap();

        assert_eq!(place.creator, user_id);
        assert_eq!(owned_ids(&pool, user_id).await, vec![place.id]);
        let listed = svc.list_by_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, place.id);
    }

    #[tokio::test]
    #[ignore]
    async fn geocode_failure_writes_nothing() {
        let pool = test_pool().await;
        let svc = service(pool.clone(), Arc::new(FailingGeocoder)).await;
        let user_id = signup(&pool, "geofail").await;

        let err = svc.create_place(user_id, place_req("Nowhere")).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Geocode);
        assert!(owned_ids(&pool, user_id).await.is_empty());
        assert!(svc.list_by_user(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn aborted_unit_leaves_no_partial_state() {
        let pool = test_pool().await;
        let svc = service(pool.clone(), Arc::new(FixedGeocoder)).await;
        let user_id = signup(&pool, "abort").await;

        // Fault injection: run the unit with an attach step that must fail
        // by pointing it at a missing owner, then roll back.
        let data = NewPlace {
            title: "Ghost".to_string(),
            description: "never visible".to_string(),
            address: "nowhere".to_string(),
            location: GeoPoint::new(0.0, 0.0),
            image: String::new(),
            creator: user_id,
        };
        let mut tx = pool.begin().await.unwrap();
        let place = svc.place_repo.insert(&mut *tx, &data).await.unwrap();
        let missing_owner = Uuid::new_v4();
        let err = svc
            .user_repo
            .attach_place(&mut *tx, missing_owner, place.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        tx.rollback().await.unwrap();

        // Neither the place nor any list entry is observable.
        assert!(svc.place_repo.find_by_id(place.id).await.unwrap().is_none());
        assert!(owned_ids(&pool, user_id).await.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn concurrent_creates_lose_no_ids() {
        let pool = test_pool().await;
        let svc = service(pool.clone(), Arc::new(FixedGeocoder)).await;
        let user_id = signup(&pool, "concurrent").await;

        let (a, b) = tokio::join!(
            svc.create_place(user_id, place_req("First")),
            svc.create_place(user_id, place_req("Second")),
        );
        let a = a.unwrap();
        let b = b.unwrap();

        let ids = owned_ids(&pool, user_id).await;
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a.id));
        assert!(ids.contains(&b.id));
    }

    #[tokio::test]
    #[ignore]
    async fn delete_removes_place_and_list_entry() {
        let pool = test_pool().await;
        let svc = service(pool.clone(), Arc::new(FixedGeocoder)).await;
        let owner = signup(&pool, "owner").await;
        let stranger = signup(&pool, "stranger").await;

        let place = svc.create_place(owner, place_req("Short-lived")).await.unwrap();

        // Non-owner is rejected regardless of how valid their token was.
        let err = svc.delete_place(stranger, place.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(owned_ids(&pool, owner).await, vec![place.id]);

        svc.delete_place(owner, place.id).await.unwrap();

        let err = svc.get_place(place.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(owned_ids(&pool, owner).await.is_empty());

        // Deleting again reports NotFound, not an abort.
        let err = svc.delete_place(owner, place.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    #[ignore]
    async fn update_requires_ownership() {
        let pool = test_pool().await;
        let svc = service(pool.clone(), Arc::new(FixedGeocoder)).await;
        let owner = signup(&pool, "editor").await;
        let stranger = signup(&pool, "reader").await;

        let place = svc.create_place(owner, place_req("Before")).await.unwrap();

        let req = UpdatePlaceRequest {
            title: "After".to_string(),
            description: "edited".to_string(),
        };
        let err = svc.update_place(stranger, place.id, req.clone()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let updated = svc.update_place(owner, place.id, req).await.unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.lat, place.lat);
    }
}
