//! Integration tests for the Overpass client and the search (wiremock-based)

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use peak_finder::config::SearchConfig;
use peak_finder::peaks::overpass::OverpassClient;
use peak_finder::peaks::{FailurePolicy, PeakSearch, PeakSource};
use peak_finder::{Coordinates, DistanceUnit, Error, QueryError};

const fn sample_peaks_json() -> &'static str {
    r#"{
        "version": 0.6,
        "generator": "Overpass API",
        "elements": [
            {"type": "node", "id": 101, "lat": 34.2889, "lon": -117.6464, "tags": {"natural": "peak", "name": "Mount San Antonio", "ele": "3068"}},
            {"type": "node", "id": 102, "lat": 34.2225, "lon": -117.5990, "tags": {"natural": "peak", "name": "Cucamonga Peak"}},
            {"type": "node", "id": 103, "lat": 34.2700, "lon": -117.6120, "tags": {"natural": "peak", "name": "Ontario Peak"}},
            {"type": "node", "id": 104, "lat": 34.2500, "lon": -117.6000, "tags": {"natural": "peak"}},
            {"type": "node", "id": 105, "lat": 34.2400, "lon": -117.6100, "tags": {"natural": "peak", "ele": "2400"}}
        ]
    }"#
}

fn center() -> Coordinates {
    Coordinates::new(34.2, -117.6)
}

fn client_for(server: &MockServer, timeout: Duration) -> OverpassClient {
    OverpassClient::with_endpoint(format!("{}/api/interpreter", server.uri()), timeout).unwrap()
}

fn config_for_mock(base_url: &str) -> SearchConfig {
    SearchConfig {
        endpoint: format!("{}/api/interpreter", base_url),
        unit: DistanceUnit::Meters,
        radius_floor: 10.0,
        radius_step: 20.0,
        radius_ceiling: 100.0,
        timeout_secs: 2,
        ..SearchConfig::default()
    }
}

#[tokio::test]
async fn test_query_returns_named_peaks_only() {
    let server = MockServer::start().await;

    let expected_query = OverpassClient::build_query(center(), 5000.0, Duration::from_secs(5));
    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .and(query_param("data", expected_query.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_peaks_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let peaks = client.query(center(), 5000.0).await.unwrap();

    assert_eq!(peaks.len(), 3);
    assert_eq!(peaks[0].name, "Mount San Antonio");
    assert_eq!(peaks[0].id, Some(101));
    assert_eq!(peaks[0].elevation_meters, Some(3068.0));
}

#[tokio::test]
async fn test_query_empty_elements() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"elements": []}"#))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let peaks = client.query(center(), 5000.0).await.unwrap();

    assert!(peaks.is_empty());
}

#[tokio::test]
async fn test_query_server_error_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.query(center(), 5000.0).await.unwrap_err();

    match err {
        QueryError::TransportFailure(msg) => assert!(msg.contains("429")),
        other => panic!("expected transport failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_invalid_json_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<osm><remark>runtime error</remark></osm>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.query(center(), 5000.0).await.unwrap_err();

    assert!(matches!(err, QueryError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_query_timeout_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sample_peaks_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(300));
    let err = client.query(center(), 5000.0).await.unwrap_err();

    assert!(matches!(err, QueryError::TransportFailure(_)));
}

#[tokio::test]
async fn test_query_connection_refused() {
    // Port 9 (discard) is not expected to be listening on localhost
    let client =
        OverpassClient::with_endpoint("http://127.0.0.1:9/api/interpreter", Duration::from_secs(2))
            .unwrap();

    let err = client.query(center(), 5000.0).await.unwrap_err();

    assert_eq!(err.kind(), "transport_failure");
}

#[tokio::test]
async fn test_search_ranks_and_truncates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_peaks_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let search = PeakSearch::from_config(OverpassClient::new(&config).unwrap(), &config).unwrap();

    let ranked = search.find_nearest_peaks(center(), 2).await.unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked.get(0).unwrap().peak.name, "Cucamonga Peak");
    assert_eq!(ranked.get(1).unwrap().peak.name, "Ontario Peak");
    assert!(ranked.distances()[0] < ranked.distances()[1]);
}

#[tokio::test]
async fn test_search_survives_outage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(5)
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri());
    let search = PeakSearch::from_config(OverpassClient::new(&config).unwrap(), &config).unwrap();

    let report = search.search(center(), 5).await.unwrap();

    assert!(report.ranked.is_empty());
    assert_eq!(report.attempts.len(), 5);
    assert_eq!(report.failed_attempts(), 5);
}

#[tokio::test]
async fn test_search_abort_on_outage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = SearchConfig {
        failure_policy: FailurePolicy::Abort,
        ..config_for_mock(&server.uri())
    };
    let search = PeakSearch::from_config(OverpassClient::new(&config).unwrap(), &config).unwrap();

    let err = search.find_nearest_peaks(center(), 5).await.unwrap_err();

    assert!(matches!(err, Error::Query(QueryError::TransportFailure(_))));
}
