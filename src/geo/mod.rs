//! Current-location resolution
//!
//! The command line has no GPS, so the search center comes from a place name
//! (geocoded through Nominatim) or from the caller's IP address.

pub mod ip_location;
pub mod nominatim;

use crate::constants::api::USER_AGENT;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for location lookups
const LOOKUP_TIMEOUT_SECS: u64 = 10;

/// A resolved location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub coords: Coordinates,
    /// Display name (address or description)
    pub display_name: String,
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// HTTP client shared by the lookup services
fn lookup_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::Geo(format!("Failed to build HTTP client: {}", e)))
}

/// Get the default geocoding backend
pub fn get_geocoder() -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::new()
}

/// Get the IP location service
pub fn get_ip_locator() -> Result<ip_location::IpLocator> {
    ip_location::IpLocator::new()
}
