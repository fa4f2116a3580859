//! Error types for peak-finder

use thiserror::Error;

/// Main error type for peak-finder operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Invalid result limit: {0}")]
    InvalidLimit(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Peak query failed: {0}")]
    Query(#[from] QueryError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),
}

/// Outcome of a single failed peak query
///
/// Produced by a [`crate::peaks::PeakSource`]. The search treats these as
/// recoverable unless it runs with an aborting failure policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The query was rejected before anything was sent
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Timeout, DNS failure, refused connection or non-2xx status
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// A body arrived but did not match the expected schema
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl QueryError {
    /// Short label used in logs and attempt records
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "invalid_query",
            Self::TransportFailure(_) => "transport_failure",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Result type alias for peak-finder operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_kind() {
        assert_eq!(QueryError::InvalidQuery("x".into()).kind(), "invalid_query");
        assert_eq!(
            QueryError::TransportFailure("x".into()).kind(),
            "transport_failure"
        );
        assert_eq!(
            QueryError::MalformedResponse("x".into()).kind(),
            "malformed_response"
        );
    }

    #[test]
    fn test_query_error_converts() {
        let err: Error = QueryError::TransportFailure("timed out".into()).into();
        assert_eq!(
            err.to_string(),
            "Peak query failed: transport failure: timed out"
        );
    }
}
