//! Directions hand-off
//!
//! Route calculation happens in an external directions provider. This module
//! only packages the origin and the chosen peak into a request that provider
//! understands, as data or as a directions URL.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::peaks::PeakRecord;
use serde::{Deserialize, Serialize};

/// Name given to the origin waypoint
pub const ORIGIN_WAYPOINT_NAME: &str = "Start";

/// Name given to a destination without a better label
pub const DESTINATION_WAYPOINT_NAME: &str = "Finish";

/// How the user intends to travel to the peak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelProfile {
    /// Driving, avoiding traffic where the provider supports it
    DrivingTraffic,
    Driving,
    Walking,
    Cycling,
}

impl TravelProfile {
    /// Travel mode name used in directions URLs
    pub fn mode(self) -> &'static str {
        match self {
            Self::DrivingTraffic | Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "bicycling",
        }
    }
}

impl Default for TravelProfile {
    fn default() -> Self {
        Self::DrivingTraffic
    }
}

impl std::fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DrivingTraffic => write!(f, "driving_traffic"),
            Self::Driving => write!(f, "driving"),
            Self::Walking => write!(f, "walking"),
            Self::Cycling => write!(f, "cycling"),
        }
    }
}

impl std::str::FromStr for TravelProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving_traffic" | "driving-traffic" | "traffic" => Ok(Self::DrivingTraffic),
            "driving" | "car" => Ok(Self::Driving),
            "walking" | "foot" | "hiking" => Ok(Self::Walking),
            "cycling" | "bike" | "bicycling" => Ok(Self::Cycling),
            _ => Err(format!("Unknown travel profile: {}", s)),
        }
    }
}

/// A named point on a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub coords: Coordinates,
    pub name: String,
}

impl Waypoint {
    pub fn new(coords: Coordinates, name: impl Into<String>) -> Self {
        Self {
            coords,
            name: name.into(),
        }
    }
}

/// Everything the directions provider needs to plan a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub profile: TravelProfile,
}

impl RouteRequest {
    /// Route between two coordinates
    pub fn new(origin: Coordinates, destination: Coordinates, profile: TravelProfile) -> Result<Self> {
        origin.validate()?;
        destination.validate()?;
        Ok(Self {
            origin: Waypoint::new(origin, ORIGIN_WAYPOINT_NAME),
            destination: Waypoint::new(destination, DESTINATION_WAYPOINT_NAME),
            profile,
        })
    }

    /// Route from `origin` to a peak, labelled with the peak's name
    pub fn to_peak(origin: Coordinates, peak: &PeakRecord, profile: TravelProfile) -> Result<Self> {
        let mut request = Self::new(origin, peak.coords, profile)?;
        request.destination.name = peak.name.clone();
        Ok(request)
    }

    /// Render a directions URL for the given provider (or the configured default)
    ///
    /// Templates may use `{from_lat}`, `{from_lng}`, `{to_lat}`, `{to_lng}`
    /// and `{mode}`.
    pub fn directions_url(&self, config: &Config, provider: Option<&str>) -> Result<String> {
        let template = config.directions_template(provider)?;

        Ok(template
            .replace("{from_lat}", &self.origin.coords.lat.to_string())
            .replace("{from_lng}", &self.origin.coords.lng.to_string())
            .replace("{to_lat}", &self.destination.coords.lat.to_string())
            .replace("{to_lng}", &self.destination.coords.lng.to_string())
            .replace("{mode}", self.profile.mode()))
    }
}
