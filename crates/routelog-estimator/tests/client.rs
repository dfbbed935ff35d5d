//! Integration tests for `EstimatorClient` using wiremock HTTP mocks.

use routelog_estimator::{DistanceEstimator, EstimatorClient, EstimatorError};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/test-model:generateContent";

fn test_client(base_url: &str) -> EstimatorClient {
    EstimatorClient::with_base_url("test-key", "test-model", 5, base_url)
        .expect("client construction should not fail")
}

fn reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
}

#[tokio::test]
async fn ask_distance_returns_reply_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("72,3 km")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client
        .ask_distance("Madrid", "Toledo")
        .await
        .expect("should return text");

    assert_eq!(text, "72,3 km");
}

#[tokio::test]
async fn request_body_carries_prompt_with_both_places() {
    let server = MockServer::start().await;
    let prompt = routelog_estimator::distance_prompt("Sevilla", "Cádiz");

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("121 km")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client
        .estimate("Sevilla", "Cádiz")
        .await
        .expect("trait call should succeed");
    assert_eq!(text, "121 km");
}

#[tokio::test]
async fn forbidden_is_unexpected_status_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(3, 0);
    let err = client.ask_distance("A", "B").await.unwrap_err();

    assert!(
        matches!(err, EstimatorError::UnexpectedStatus { status: 403 }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_retried_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(2, 0);
    let err = client.ask_distance("A", "B").await.unwrap_err();

    assert!(matches!(err, EstimatorError::RateLimited), "got: {err:?}");
}

#[tokio::test]
async fn server_error_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("15 km")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(2, 0);
    let text = client.ask_distance("A", "B").await.expect("should recover");
    assert_eq!(text, "15 km");
}

#[tokio::test]
async fn empty_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.ask_distance("A", "B").await.unwrap_err();
    assert!(matches!(err, EstimatorError::EmptyResponse), "got: {err:?}");
}

#[tokio::test]
async fn non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.ask_distance("A", "B").await.unwrap_err();
    assert!(
        matches!(err, EstimatorError::Deserialize { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn slow_reply_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply("1 km"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = EstimatorClient::with_base_url("test-key", "test-model", 1, &server.uri())
        .expect("client construction should not fail");
    let err = client.ask_distance("A", "B").await.unwrap_err();
    assert!(
        matches!(err, EstimatorError::Http(ref e) if e.is_timeout()),
        "got: {err:?}"
    );
}
