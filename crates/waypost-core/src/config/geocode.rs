//! Geocoding collaborator configuration.

use serde::{Deserialize, Serialize};

/// Settings for the Google Maps geocoding API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// API key for the geocoding service.
    #[serde(default)]
    pub api_key: String,
    /// Endpoint URL. Overridable for tests.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_timeout() -> u64 {
    10
}
