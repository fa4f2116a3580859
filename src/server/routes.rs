//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::navigation::{RouteRequest, TravelProfile};
use crate::peaks::{run_search, SearchResponse};
use crate::server::state::AppState;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/peaks", get(peaks_handler))
        .route("/api/route", post(route_handler))
        .route("/api/status", get(status_handler))
        .route("/api/formats", get(formats_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "QUERY_FAILED" => StatusCode::BAD_GATEWAY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidRadius(_) => "INVALID_RADIUS",
            Error::InvalidLimit(_) => "INVALID_LIMIT",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Query(_) => "QUERY_FAILED",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError {
            error: rejection.body_text(),
            code: "INVALID_QUERY".to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            error: rejection.body_text(),
            code: "INVALID_BODY".to_string(),
        }
    }
}

/// Peak search query string
#[derive(Debug, Deserialize)]
pub struct PeaksQuery {
    pub lat: f64,
    pub lng: f64,
    /// Defaults to `search.max_results`
    pub limit: Option<usize>,
}

/// Find peaks near a coordinate
///
/// GET /api/peaks?lat=..&lng=..&limit=..
///
/// If the client disconnects, axum drops this future and the in-flight
/// Overpass request with it.
async fn peaks_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PeaksQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(query) = query?;
    let center = Coordinates::checked(query.lat, query.lng)?;
    let limit = match query.limit {
        Some(limit) => limit,
        None => state.config.read().await.search.max_results,
    };

    let search = state.peak_search().await?;
    let response = run_search(&search, center, limit).await?;

    Ok(Json(response))
}

/// Directions hand-off request body
#[derive(Debug, Deserialize)]
pub struct RouteBody {
    pub origin: Coordinates,
    pub destination: Coordinates,
    /// Destination label, usually the peak name
    pub name: Option<String>,
    pub profile: Option<TravelProfile>,
    /// Directions provider; defaults to `navigation.default`
    pub provider: Option<String>,
}

/// Directions hand-off response
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route: RouteRequest,
    pub url: String,
}

/// Package a route for the external directions provider
///
/// POST /api/route
async fn route_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RouteBody>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
    let Json(body) = body?;
    let config = state.config().await;
    let profile = body.profile.unwrap_or(config.navigation.profile);

    let mut route = RouteRequest::new(body.origin, body.destination, profile)?;
    if let Some(name) = body.name {
        route.destination.name = name;
    }
    let url = route.directions_url(&config, body.provider.as_deref())?;

    Ok(Json(RouteResponse { route, url }))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Peak query endpoint in use
    pub endpoint: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let endpoint = state.config.read().await.search.endpoint.clone();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoint,
        uptime_secs: state.uptime_secs(),
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::coord::DistanceUnit;
    use crate::peaks::FailurePolicy;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OVERPASS_BODY: &str = r#"{"elements": [
        {"id": 11, "lat": 46.02, "lon": 8.0, "tags": {"name": "Second"}},
        {"id": 10, "lat": 46.01, "lon": 8.0, "tags": {"name": "First", "ele": "1500"}},
        {"id": 12, "lat": 46.03, "lon": 8.0}
    ]}"#;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config::default()))
    }

    fn state_for_mock(server: &MockServer) -> Arc<AppState> {
        let mut config = Config::default();
        config.search.endpoint = format!("{}/api/interpreter", server.uri());
        config.search.unit = DistanceUnit::Meters;
        config.search.radius_floor = 1000.0;
        config.search.radius_step = 1000.0;
        config.search.radius_ceiling = 2000.0;
        config.search.timeout_secs = 2;
        Arc::new(AppState::new(config))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();

        assert!(status.running);
        assert_eq!(status.endpoint, "https://overpass-api.de/api/interpreter");
    }

    #[tokio::test]
    async fn test_formats_endpoint() {
        let app = create_router(create_test_state());

        let (status, body) = get_json(app, "/api/formats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["formats"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_peaks_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(200).set_body_string(OVERPASS_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let app = create_router(state_for_mock(&server));
        let (status, body) = get_json(app, "/api/peaks?lat=46.0&lng=8.0&limit=1").await;

        assert_eq!(status, StatusCode::OK);
        let response: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.peaks.len(), 1);
        assert_eq!(response.peaks[0].peak.name, "First");
        assert_eq!(response.peaks[0].peak.elevation_meters, Some(1500.0));
        assert_eq!(response.attempts.len(), 1);
    }

    #[tokio::test]
    async fn test_peaks_endpoint_soft_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(504))
            .expect(2)
            .mount(&server)
            .await;

        let app = create_router(state_for_mock(&server));
        let (status, body) = get_json(app, "/api/peaks?lat=46.0&lng=8.0").await;

        assert_eq!(status, StatusCode::OK);
        let response: SearchResponse = serde_json::from_value(body).unwrap();
        assert!(response.peaks.is_empty());
        assert_eq!(response.request.limit, 5);
        assert_eq!(response.attempts.len(), 2);
    }

    #[tokio::test]
    async fn test_peaks_endpoint_abort_policy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for_mock(&server);
        state.config.write().await.search.failure_policy = FailurePolicy::Abort;
        let app = create_router(state);

        let (status, body) = get_json(app, "/api/peaks?lat=46.0&lng=8.0").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "QUERY_FAILED");
    }

    #[tokio::test]
    async fn test_peaks_invalid_coordinates() {
        let app = create_router(create_test_state());

        let (status, body) = get_json(app, "/api/peaks?lat=123.0&lng=8.0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_peaks_invalid_limit() {
        let app = create_router(create_test_state());

        let (status, body) = get_json(app, "/api/peaks?lat=46.0&lng=8.0&limit=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_LIMIT");
    }

    #[tokio::test]
    async fn test_peaks_malformed_query_is_json_error() {
        for uri in ["/api/peaks?lng=8.0", "/api/peaks?lat=north&lng=8.0"] {
            let app = create_router(create_test_state());

            let (status, body) = get_json(app, uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "INVALID_QUERY");
            assert!(body["error"].as_str().is_some());
        }
    }

    #[tokio::test]
    async fn test_route_endpoint() {
        let app = create_router(create_test_state());

        let request_body = serde_json::json!({
            "origin": {"lat": 46.0, "lng": 8.0},
            "destination": {"lat": 46.5, "lng": 8.25},
            "name": "Eiger",
            "profile": "walking"
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/route")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let route: RouteResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(route.route.destination.name, "Eiger");
        assert_eq!(route.route.profile, TravelProfile::Walking);
        assert!(route.url.contains("destination=46.5,8.25"));
        assert!(route.url.contains("travelmode=walking"));
    }

    #[tokio::test]
    async fn test_route_unknown_provider() {
        let app = create_router(create_test_state());

        let request_body = serde_json::json!({
            "origin": {"lat": 46.0, "lng": 8.0},
            "destination": {"lat": 46.5, "lng": 8.25},
            "provider": "mapquest"
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/route")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_route_missing_destination_is_json_error() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/route")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"origin": {"lat": 46.0, "lng": 8.0}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_BODY");
    }
}
