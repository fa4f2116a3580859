//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Turns a place name into a search center.
//! Rate limit: 1 request per second, and a User-Agent is required.

use crate::constants::api::NOMINATIM_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{lookup_client, GeoBackend, GeoLocation};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimBackend {
    /// Create a new Nominatim backend
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Create a backend against another Nominatim instance
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: lookup_client()?,
            base_url: base_url.into(),
        })
    }

    /// Parse lat/lng strings into validated coordinates
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid longitude: {}", lng)))?;
        Coordinates::checked(lat, lng)
    }
}

impl GeoBackend for NominatimBackend {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(query, "geocoding");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        match results.into_iter().next() {
            Some(result) => Ok(Some(GeoLocation {
                coords: Self::parse_coords(&result.lat, &result.lon)?,
                display_name: result.display_name,
            })),
            None => Ok(None),
        }
    }
}
