//! Peak lookup
//!
//! This module handles:
//! - The `PeakSource` trait (one bounded-radius query against a POI service)
//! - The Overpass implementation of that trait
//! - The expanding-radius search and the ranked result it produces

pub mod overpass;
pub mod ranking;
pub mod response;
pub mod search;

use crate::coord::Coordinates;
use crate::error::QueryError;
use serde::{Deserialize, Serialize};

pub use ranking::{RankedPeak, RankedResult};
pub use response::{run_search, SearchResponse};
pub use search::{FailurePolicy, PeakSearch, RadiusSchedule, SearchAttempt, SearchReport};

/// A named peak returned by the geodata service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakRecord {
    /// OpenStreetMap node id, when the service reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub coords: Coordinates,
    /// Elevation from the `ele` tag, if it was numeric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_meters: Option<f64>,
}

impl PeakRecord {
    /// Create a peak record without elevation
    pub fn new(id: Option<i64>, name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            id,
            name: name.into(),
            coords,
            elevation_meters: None,
        }
    }

    /// Attach an elevation in meters
    pub fn with_elevation(mut self, meters: f64) -> Self {
        self.elevation_meters = Some(meters);
        self
    }
}

/// One bounded-radius query as issued by the search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub center: Coordinates,
    pub radius_meters: f64,
}

impl SearchQuery {
    pub fn new(center: Coordinates, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }
}

/// Trait for peak data sources
///
/// An implementation issues exactly one request per call and never retries;
/// the search decides what to do with failures.
pub trait PeakSource: Send + Sync {
    /// Find named peaks within `radius_meters` of `center`
    ///
    /// Records lacking a name or coordinates are dropped, not reported.
    /// A well-formed empty reply is `Ok(vec![])`.
    fn query(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> impl std::future::Future<Output = Result<Vec<PeakRecord>, QueryError>> + Send;
}

/// Get the default peak source
pub fn get_peak_source(
    config: &crate::config::SearchConfig,
) -> crate::error::Result<overpass::OverpassClient> {
    overpass::OverpassClient::new(config)
}
