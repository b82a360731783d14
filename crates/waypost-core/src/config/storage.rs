//! Uploaded-image storage configuration.

use serde::{Deserialize, Serialize};

/// Settings for the local image store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding uploaded place and avatar images.
    #[serde(default = "default_root")]
    pub image_root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_root: default_root(),
        }
    }
}

fn default_root() -> String {
    "uploads/images".to_string()
}
