//! Search response envelope
//!
//! What the shells (CLI formatters, HTTP API) hand back to their callers.

use crate::coord::{Coordinates, DistanceUnit};
use crate::error::Result;
use crate::peaks::{PeakSearch, PeakSource, RankedPeak, SearchAttempt, SearchReport};
use serde::{Deserialize, Serialize};

/// Full response for one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Unique ID for this search
    pub id: String,

    /// Original request parameters
    pub request: SearchRequest,

    /// Peaks, nearest first
    pub peaks: Vec<RankedPeak>,

    /// Every radius that was queried, in order
    pub attempts: Vec<SearchAttempt>,

    pub metadata: SearchMetadata,
}

/// Request parameters for a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub lat: f64,
    pub lng: f64,
    pub limit: usize,
    pub unit: DistanceUnit,
}

/// Metadata about the search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    /// When the search finished (RFC 3339)
    pub timestamp: String,
}

impl SearchResponse {
    /// Wrap a finished search report
    pub fn new(center: Coordinates, limit: usize, unit: DistanceUnit, report: SearchReport) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            request: SearchRequest {
                lat: center.lat,
                lng: center.lng,
                limit,
                unit,
            },
            peaks: report.ranked.into_vec(),
            attempts: report.attempts,
            metadata: SearchMetadata {
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Center of the search
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.request.lat, self.request.lng)
    }

    /// Peak at a zero-based rank
    pub fn peak(&self, index: usize) -> Option<&RankedPeak> {
        self.peaks.get(index)
    }
}

/// Run a search and wrap the outcome for display
pub async fn run_search<S: PeakSource>(
    search: &PeakSearch<S>,
    center: Coordinates,
    limit: usize,
) -> Result<SearchResponse> {
    let report = search.search(center, limit).await?;
    Ok(SearchResponse::new(center, limit, search.unit(), report))
}
