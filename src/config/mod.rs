//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/peak-finder/config.toml

pub mod defaults;

use crate::coord::DistanceUnit;
use crate::error::{Error, Result};
use crate::peaks::search::{
    FailurePolicy, RadiusSchedule, DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_CEILING,
    DEFAULT_RADIUS_FLOOR, DEFAULT_RADIUS_STEP,
};
use crate::navigation::TravelProfile;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Peak search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Map URL settings
    #[serde(default)]
    pub url: UrlConfig,

    /// Directions hand-off settings
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Peak search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Overpass interpreter URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Unit the radius schedule is expressed in
    #[serde(default)]
    pub unit: DistanceUnit,

    /// First radius tried
    #[serde(default = "default_radius_floor")]
    pub radius_floor: f64,

    /// Increment between radii
    #[serde(default = "default_radius_step")]
    pub radius_step: f64,

    /// Largest radius tried
    #[serde(default = "default_radius_ceiling")]
    pub radius_ceiling: f64,

    /// Number of peaks returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether a failed radius is skipped or ends the search
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// If true, --here is default when no location given
    #[serde(default)]
    pub default_here: bool,
}

/// Map URL settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

/// Directions hand-off settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Default directions provider
    #[serde(default = "default_directions_provider")]
    pub default: String,

    /// Travel profile requested from the provider
    #[serde(default = "default_profile")]
    pub profile: TravelProfile,

    /// Directions URL templates
    #[serde(default = "default_directions_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_radius_floor() -> f64 {
    DEFAULT_RADIUS_FLOOR
}
fn default_radius_step() -> f64 {
    DEFAULT_RADIUS_STEP
}
fn default_radius_ceiling() -> f64 {
    DEFAULT_RADIUS_CEILING
}
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},14z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=14/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}
fn default_directions_provider() -> String {
    DEFAULT_DIRECTIONS_PROVIDER.to_string()
}
fn default_profile() -> TravelProfile {
    TravelProfile::from_str(DEFAULT_PROFILE).unwrap_or_default()
}
fn default_directions_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/dir/?api=1&origin={from_lat},{from_lng}&destination={to_lat},{to_lng}&travelmode={mode}"
            .to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/directions?route={from_lat},{from_lng};{to_lat},{to_lng}"
            .to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?saddr={from_lat},{from_lng}&daddr={to_lat},{to_lng}".to_string(),
    );
    providers
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            unit: DistanceUnit::from_str(DEFAULT_UNIT).unwrap_or_default(),
            radius_floor: default_radius_floor(),
            radius_step: default_radius_step(),
            radius_ceiling: default_radius_ceiling(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
            failure_policy: FailurePolicy::from_str(DEFAULT_FAILURE_POLICY).unwrap_or_default(),
        }
    }
}

impl SearchConfig {
    /// The radius schedule described by this config
    pub fn schedule(&self) -> Result<RadiusSchedule> {
        RadiusSchedule::new(self.radius_floor, self.radius_step, self.radius_ceiling)
    }

    /// Check values that would make every search fail
    pub fn validate(&self) -> Result<()> {
        self.schedule()?;
        if self.max_results == 0 {
            return Err(Error::Config("search.max_results must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("search.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default: default_directions_provider(),
            profile: default_profile(),
            providers: default_directions_providers(),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            let config: Config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
            config.search.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "endpoint"] => Some(self.search.endpoint.clone()),
            ["search", "unit"] => Some(self.search.unit.to_string()),
            ["search", "radius_floor"] => Some(self.search.radius_floor.to_string()),
            ["search", "radius_step"] => Some(self.search.radius_step.to_string()),
            ["search", "radius_ceiling"] => Some(self.search.radius_ceiling.to_string()),
            ["search", "max_results"] => Some(self.search.max_results.to_string()),
            ["search", "timeout_secs"] => Some(self.search.timeout_secs.to_string()),
            ["search", "failure_policy"] => Some(self.search.failure_policy.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["location", "default_here"] => Some(self.location.default_here.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            ["navigation", "default"] => Some(self.navigation.default.clone()),
            ["navigation", "profile"] => Some(self.navigation.profile.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong. Search values
    /// are validated together, so a change that would break every search is
    /// rejected and leaves the config untouched.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        let mut search = self.search.clone();

        match parts.as_slice() {
            ["search", "endpoint"] => search.endpoint = value.to_string(),
            ["search", "unit"] => search.unit = parse_value(key, value)?,
            ["search", "radius_floor"] => search.radius_floor = parse_value(key, value)?,
            ["search", "radius_step"] => search.radius_step = parse_value(key, value)?,
            ["search", "radius_ceiling"] => search.radius_ceiling = parse_value(key, value)?,
            ["search", "max_results"] => search.max_results = parse_value(key, value)?,
            ["search", "timeout_secs"] => search.timeout_secs = parse_value(key, value)?,
            ["search", "failure_policy"] => search.failure_policy = parse_value(key, value)?,

            ["output", "format"] => self.output.format = value.to_string(),

            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => self.server.port = parse_value(key, value)?,

            ["location", "default_here"] => {
                self.location.default_here = parse_value(key, value)?;
            }

            ["url", "default"] => self.url.default = value.to_string(),

            ["navigation", "default"] => self.navigation.default = value.to_string(),
            ["navigation", "profile"] => self.navigation.profile = parse_value(key, value)?,

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        search.validate()?;
        self.search = search;
        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "search.endpoint",
            "search.unit",
            "search.radius_floor",
            "search.radius_step",
            "search.radius_ceiling",
            "search.max_results",
            "search.timeout_secs",
            "search.failure_policy",
            "output.format",
            "server.host",
            "server.port",
            "location.default_here",
            "url.default",
            "navigation.default",
            "navigation.profile",
        ]
    }

    /// Format a map URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Look up a directions URL template
    pub fn directions_template(&self, provider: Option<&str>) -> Result<&str> {
        let provider_name = provider.unwrap_or(&self.navigation.default);

        self.navigation
            .providers
            .get(provider_name)
            .map(String::as_str)
            .ok_or_else(|| {
                Error::Config(format!("Unknown directions provider: {}", provider_name))
            })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
