//! Integration tests for the upstream provider client, against a mocked
//! provider HTTP API.

use std::time::Duration;

use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moolax_upstream::{FetchError, FixerClient, RateProvider, UpstreamConfig};

fn client_for(server: &MockServer) -> FixerClient {
    FixerClient::new(
        UpstreamConfig::new(Url::parse(&server.uri()).unwrap(), "test-key")
            .with_request_timeout(Duration::from_secs(2)),
    )
}

#[tokio::test]
async fn fetch_latest_returns_payload_verbatim() {
    let server = MockServer::start().await;

    let body = r#"{"success":true,"base":"EUR","timestamp":1700000000,"rates":{"USD":1.07}}"#;
    Mock::given(method("GET"))
        .and(path("/api/latest"))
        .and(query_param("access_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_latest().await.unwrap();

    // The payload must pass through byte-for-byte.
    assert_eq!(snapshot.as_str(), body);
}

#[tokio::test]
async fn fetch_latest_sends_credential_as_query_param() {
    let server = MockServer::start().await;

    // Only a request carrying the access key matches; anything else 404s
    // and surfaces as UpstreamUnavailable.
    Mock::given(method("GET"))
        .and(path("/api/latest"))
        .and(query_param("access_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"success":true}"#, "application/json"))
        .mount(&server)
        .await;

    assert!(client_for(&server).fetch_latest().await.is_ok());
}

#[tokio::test]
async fn provider_rejection_carries_error_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success":false,"error":{"code":104,"info":"rate limit reached"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_latest().await.unwrap_err();
    match err {
        FetchError::ProviderRejected(payload) => {
            assert_eq!(payload["code"], 104);
        }
        other => panic!("expected ProviderRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_success_flag_counts_as_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"base":"EUR"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_latest().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::ProviderRejected(serde_json::Value::Null)
    ));
}

#[tokio::test]
async fn non_success_status_maps_to_upstream_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/latest"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_latest().await.unwrap_err();
    assert!(matches!(err, FetchError::UpstreamUnavailable(503)));
}

#[tokio::test]
async fn undecodable_body_maps_to_invalid_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_latest().await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidPayload(_)));
}

#[tokio::test]
async fn transport_failure_maps_to_network_error() {
    // Nothing listens here; the connection is refused.
    let client = FixerClient::new(
        UpstreamConfig::new(Url::parse("http://127.0.0.1:9").unwrap(), "test-key")
            .with_request_timeout(Duration::from_secs(2)),
    );

    let err = client.fetch_latest().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}
