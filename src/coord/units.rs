//! Distance units
//!
//! Search radii are configured in a user-facing unit and converted to meters
//! before they reach the query client.

use crate::constants::geo::{METERS_PER_KILOMETER, METERS_PER_MILE};
use serde::{Deserialize, Serialize};

/// Unit a search radius is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Number of meters in one of this unit
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => METERS_PER_KILOMETER,
            Self::Miles => METERS_PER_MILE,
        }
    }

    /// Convert a value in this unit to meters
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Convert meters to this unit
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    /// Abbreviation used in human-readable output
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Miles => "mi",
        }
    }
}

impl Default for DistanceUnit {
    fn default() -> Self {
        Self::Miles
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Meters => write!(f, "meters"),
            Self::Kilometers => write!(f, "kilometers"),
            Self::Miles => write!(f, "miles"),
        }
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(Self::Meters),
            "km" | "kilometer" | "kilometers" => Ok(Self::Kilometers),
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::str::FromStr;

    #[test]
    fn test_miles_to_meters() {
        assert_relative_eq!(DistanceUnit::Miles.to_meters(1.0), 1609.344);
        assert_relative_eq!(DistanceUnit::Miles.to_meters(10.0), 16_093.44);
    }

    #[test]
    fn test_from_meters() {
        assert_relative_eq!(DistanceUnit::Kilometers.from_meters(2500.0), 2.5);
        assert_relative_eq!(DistanceUnit::Miles.from_meters(1609.344), 1.0);
        assert_relative_eq!(DistanceUnit::Meters.from_meters(42.0), 42.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(DistanceUnit::from_str("mi"), Ok(DistanceUnit::Miles));
        assert_eq!(DistanceUnit::from_str("Kilometers"), Ok(DistanceUnit::Kilometers));
        assert_eq!(DistanceUnit::from_str("meters"), Ok(DistanceUnit::Meters));
        assert!(DistanceUnit::from_str("furlongs").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for unit in [DistanceUnit::Meters, DistanceUnit::Kilometers, DistanceUnit::Miles] {
            assert_eq!(DistanceUnit::from_str(&unit.to_string()), Ok(unit));
        }
    }
}
