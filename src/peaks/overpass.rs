//! Overpass peak source (OpenStreetMap)
//!
//! Issues one `natural=peak` around-query per call against the Overpass API.
//! Usage policy asks for an identifying User-Agent and modest request rates;
//! the search never sends more than one request at a time.

use crate::config::SearchConfig;
use crate::constants::api::USER_AGENT;
use crate::coord::Coordinates;
use crate::error::{Error, QueryError, Result};
use crate::peaks::{PeakRecord, PeakSource};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Overpass API peak source
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

/// Overpass JSON reply
///
/// Example: `{"elements": [{"type": "node", "id": 1, "lat": 46.5, "lon": 8.0, "tags": {"name": "Eiger"}}]}`
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
    /// Set when the server hit a runtime limit; elements may be partial
    #[serde(default)]
    remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: Option<i64>,
    lat: Option<f64>,
    lon: Option<f64>,
    tags: Option<ElementTags>,
}

#[derive(Debug, Deserialize)]
struct ElementTags {
    name: Option<String>,
    ele: Option<String>,
}

impl OverpassClient {
    /// Create a client from the search configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Self::with_endpoint(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    /// Create a client for a specific endpoint and per-request timeout
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Build the Overpass QL text for a peak around-query
    ///
    /// The server-side timeout mirrors the client timeout so the server gives
    /// up no later than we do.
    pub fn build_query(center: Coordinates, radius_meters: f64, timeout: Duration) -> String {
        let server_timeout = timeout.as_secs().max(1);
        format!(
            "[out:json][timeout:{}];node[\"natural\"=\"peak\"](around:{},{},{});out;",
            server_timeout, radius_meters, center.lat, center.lng
        )
    }

    /// Full request URL for a query
    pub fn query_url(&self, center: Coordinates, radius_meters: f64) -> String {
        let query = Self::build_query(center, radius_meters, self.timeout);
        format!("{}?data={}", self.endpoint, urlencoding::encode(&query))
    }

    /// Parse an Overpass reply body into peak records
    ///
    /// Elements without coordinates or a name are skipped.
    pub fn parse_response(body: &str) -> std::result::Result<Vec<PeakRecord>, QueryError> {
        let response: OverpassResponse = serde_json::from_str(body).map_err(|e| {
            QueryError::MalformedResponse(format!("Failed to parse Overpass response: {}", e))
        })?;

        if let Some(remark) = &response.remark {
            warn!(remark = %remark, "Overpass reply carries a remark, results may be partial");
        }

        let total = response.elements.len();
        let peaks: Vec<PeakRecord> = response
            .elements
            .into_iter()
            .filter_map(Self::element_to_peak)
            .collect();

        if peaks.len() < total {
            debug!(kept = peaks.len(), dropped = total - peaks.len(), "filtered incomplete elements");
        }

        Ok(peaks)
    }

    fn element_to_peak(element: OverpassElement) -> Option<PeakRecord> {
        let coords = Coordinates::new(element.lat?, element.lon?);
        if !coords.is_valid() {
            return None;
        }

        let tags = element.tags?;
        let name = tags.name.filter(|n| !n.trim().is_empty())?;

        Some(PeakRecord {
            id: element.id,
            name,
            coords,
            elevation_meters: tags.ele.as_deref().and_then(parse_elevation),
        })
    }
}

/// Parse an OSM `ele` value such as `"3967"` or `"3967 m"`
fn parse_elevation(raw: &str) -> Option<f64> {
    let value = raw.trim();
    let value = value.strip_suffix('m').unwrap_or(value).trim();
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl PeakSource for OverpassClient {
    async fn query(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> std::result::Result<Vec<PeakRecord>, QueryError> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(QueryError::InvalidQuery(format!(
                "Radius must be positive, got {}",
                radius_meters
            )));
        }
        center
            .validate()
            .map_err(|e| QueryError::InvalidQuery(e.to_string()))?;

        let url = self.query_url(center, radius_meters);
        debug!(lat = center.lat, lng = center.lng, radius_meters, "querying Overpass");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QueryError::TransportFailure(format!("Overpass request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(QueryError::TransportFailure(format!(
                "Overpass returned status: {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| {
            QueryError::TransportFailure(format!("Failed to read Overpass response: {}", e))
        })?;

        Self::parse_response(&body)
    }
}
