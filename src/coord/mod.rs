//! Coordinates and distance math
//!
//! This module handles:
//! - The validated coordinate type shared by every other module
//! - Great-circle distance between coordinates
//! - Conversion between the distance units a search can be expressed in

pub mod distance;
pub mod units;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub use distance::haversine_distance;
pub use units::DistanceUnit;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create coordinates, rejecting anything outside the valid ranges
    pub fn checked(lat: f64, lng: f64) -> Result<Self> {
        let coords = Self::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Whether the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
