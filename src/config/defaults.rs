//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::OVERPASS_URL;

/// Default peak query endpoint
pub const DEFAULT_ENDPOINT: &str = OVERPASS_URL;

/// Default unit for search radii
pub const DEFAULT_UNIT: &str = "miles";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default failure policy name
pub const DEFAULT_FAILURE_POLICY: &str = "continue";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Default map URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Default directions provider
pub const DEFAULT_DIRECTIONS_PROVIDER: &str = "google";

/// Default travel profile for directions
pub const DEFAULT_PROFILE: &str = "driving_traffic";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "peak-finder";
