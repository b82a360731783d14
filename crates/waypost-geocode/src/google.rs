//! Google Maps geocoding API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use waypost_core::config::geocode::GeocodeConfig;
use waypost_core::error::{AppError, ErrorKind};
use waypost_core::result::AppResult;
use waypost_core::traits::Geocoder;
use waypost_core::types::GeoPoint;

/// Geocoder backed by the Google Maps geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Top-level geocoding API response.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    /// Creates a new geocoder from configuration.
    pub fn new(config: &GeocodeConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build geocoding HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn parse(body: GeocodeResponse) -> AppResult<GeoPoint> {
        if body.status == "ZERO_RESULTS" || body.results.is_empty() {
            return Err(AppError::geocode(
                "Could not find the location for the specified address",
            ));
        }
        if body.status != "OK" {
            return Err(AppError::internal(format!(
                "Geocoding service returned status {}",
                body.status
            )));
        }
        let location = &body.results[0].geometry.location;
        Ok(GeoPoint::new(location.lat, location.lng))
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> AppResult<GeoPoint> {
        debug!(address, "Resolving address");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Geocoding request failed: {e}"),
                    e,
                )
            })?;

        let body: GeocodeResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Malformed geocoding response: {e}"),
                e,
            )
        })?;

        Self::parse(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_first_result() {
        let body = response(
            r#"{
                "status": "OK",
                "results": [
                    {"geometry": {"location": {"lat": 40.7484, "lng": -73.9857}}},
                    {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
                ]
            }"#,
        );
        let point = GoogleGeocoder::parse(body).unwrap();
        assert_eq!(point.lat, 40.7484);
        assert_eq!(point.lng, -73.9857);
    }

    #[test]
    fn zero_results_is_geocode_error() {
        let body = response(r#"{"status": "ZERO_RESULTS", "results": []}"#);
        let err = GoogleGeocoder::parse(body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Geocode);
    }

    #[test]
    fn service_fault_is_internal() {
        let body = response(
            r#"{"status": "OVER_QUERY_LIMIT", "results": [
                {"geometry": {"location": {"lat": 1.0, "lng": 2.0}}}
            ]}"#,
        );
        let err = GoogleGeocoder::parse(body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }
}
