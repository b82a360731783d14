//! Local filesystem image store.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use waypost_core::error::{AppError, ErrorKind};
use waypost_core::result::AppResult;

/// Local filesystem store rooted at the configured image directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    /// Root directory for all stored images.
    root: PathBuf,
}

impl ImageStore {
    /// Create a new image store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to create image root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative path to an absolute path within the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let clean = path.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Whether a stored image exists.
    pub async fn exists(&self, path: &str) -> bool {
        fs::metadata(self.resolve(path)).await.is_ok()
    }

    /// Remove a stored image.
    pub async fn remove(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        fs::remove_file(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Image not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to remove image: {path}"),
                    e,
                )
            }
        })?;
        debug!(path, "Removed image");
        Ok(())
    }

    /// Remove a stored image, logging instead of propagating failure.
    ///
    /// Used where the authoritative state is already correct without the
    /// file: after a committed delete transaction, and when unwinding an
    /// upload whose place creation failed.
    pub async fn remove_best_effort(&self, path: &str) {
        if let Err(e) = self.remove(path).await {
            warn!(path, error = %e, "Image cleanup failed");
        }
    }

    /// Root directory holding all stored images.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> ImageStore {
        let dir = std::env::temp_dir().join(format!("waypost-store-{}", std::process::id()));
        ImageStore::new(dir.to_str().unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn remove_deletes_file() {
        let store = temp_store().await;
        let path = "pic.jpg";
        fs::write(store.resolve(path), b"jpeg bytes").await.unwrap();
        assert!(store.exists(path).await);

        store.remove(path).await.unwrap();
        assert!(!store.exists(path).await);
    }

    #[tokio::test]
    async fn remove_missing_is_not_found() {
        let store = temp_store().await;
        let err = store.remove("nope.jpg").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn best_effort_remove_never_panics() {
        let store = temp_store().await;
        store.remove_best_effort("also-missing.jpg").await;
    }
}
