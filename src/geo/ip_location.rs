//! IP-based geolocation
//!
//! Uses ip-api.com for IP geolocation with file-based caching.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{lookup_client, GeoLocation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::debug;

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

/// Cached location data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedLocation {
    location: GeoLocation,
    timestamp: u64,
}

fn now_secs() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

impl IpLocator {
    /// Create a new IP locator with default cache path
    pub fn new() -> Result<Self> {
        let cache_path = dirs::cache_dir()
            .map(|p| p.join(crate::config::defaults::APP_DIR_NAME).join(IP_LOCATION_CACHE_FILE));

        Ok(Self {
            client: lookup_client()?,
            url: IP_API_URL.to_string(),
            cache_path,
        })
    }

    /// Create an IP locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Result<Self> {
        Ok(Self {
            cache_path: Some(cache_path),
            ..Self::new()?
        })
    }

    /// Create an IP locator without caching
    pub fn without_cache() -> Result<Self> {
        Ok(Self {
            cache_path: None,
            ..Self::new()?
        })
    }

    /// Point the locator at another lookup URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Get current location based on IP address
    pub async fn locate(&self) -> Result<GeoLocation> {
        if let Some(cached) = self.load_cache() {
            debug!("using cached IP location");
            return Ok(cached);
        }

        let location = self.fetch_location().await?;
        self.save_cache(&location);

        Ok(location)
    }

    /// Fetch location from ip-api.com
    async fn fetch_location(&self) -> Result<GeoLocation> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        if data.status != "success" {
            return Err(Error::Geo("IP location lookup failed".to_string()));
        }

        let lat = data
            .lat
            .ok_or_else(|| Error::Geo("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| Error::Geo("No longitude in response".to_string()))?;

        let display_name = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(GeoLocation {
            coords: Coordinates::checked(lat, lng)?,
            display_name: if display_name.is_empty() {
                "Unknown Location".to_string()
            } else {
                display_name
            },
        })
    }

    /// Load cached location if still fresh
    fn load_cache(&self) -> Option<GeoLocation> {
        let cache_path = self.cache_path.as_ref()?;
        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedLocation = serde_json::from_str(&content).ok()?;

        let age = now_secs()?.checked_sub(cached.timestamp)?;
        (age < IP_LOCATION_TTL_SECS).then_some(cached.location)
    }

    /// Save location to cache
    fn save_cache(&self, location: &GeoLocation) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let cached = CachedLocation {
            location: location.clone(),
            timestamp: now_secs().unwrap_or(0),
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }

    /// Drop any cached location and look it up again
    pub async fn refresh(&self) -> Result<GeoLocation> {
        self.clear_cache();
        self.locate().await
    }
}
