//! Centralized constants for the peak-finder crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// International mile in meters
    pub const METERS_PER_MILE: f64 = 1_609.344;

    /// Meters per kilometer
    pub const METERS_PER_KILOMETER: f64 = 1_000.0;
}

/// External API endpoints
pub mod api {
    /// Overpass API interpreter (OpenStreetMap query service)
    pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// User agent sent to OpenStreetMap services, which require one
    pub const USER_AGENT: &str = concat!("peak-finder/", env!("CARGO_PKG_VERSION"));
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}
