//! Integration tests for the relay gateway


use axum::http::Method;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::test_utils::{daily_envelope, daily_query, error_envelope};
use test_utils::{TestGateway, TEST_TOKEN};

fn header<'a>(response: &'a axum_test::TestResponse, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn post_injects_token_and_relays_body_verbatim() {
    let app = TestGateway::new().await;
    let upstream_body = r#"{"code":0,"msg":"","data":{"fields":["ts_code"],"items":[["000001.SZ"]]}}"#;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({
            "token": TEST_TOKEN,
            "api_name": "daily",
            "params": {"ts_code": "000001.SZ", "start_date": "20240101", "end_date": "20240131"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_body, "application/json"))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/")
        .json(&daily_query("000001.SZ", "20240101", "20240131"))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), upstream_body);
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert_eq!(header(&response, "content-type"), Some("application/json"));
}

#[tokio::test]
async fn provider_error_payload_is_relayed_unchanged() {
    let app = TestGateway::new().await;
    let envelope = error_envelope(40203, "token invalid");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/")
        .json(&daily_query("000001.SZ", "20240101", "20240131"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body, envelope);
}

#[tokio::test]
async fn arbitrary_payload_is_forwarded_without_validation() {
    let app = TestGateway::new().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "token": TEST_TOKEN,
            "api_name": "stock_basic",
            "params": {"list_status": "L"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_envelope("X", &[])))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/")
        .json(&json!({"api_name": "stock_basic", "params": {"list_status": "L"}}))
        .await;

    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn options_preflight_returns_cors_headers_and_empty_body() {
    let app = TestGateway::new().await;

    let response = app.server.method(Method::OPTIONS, "/").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert_eq!(
        header(&response, "access-control-allow-methods"),
        Some("GET, POST, OPTIONS")
    );
    assert_eq!(
        header(&response, "access-control-allow-headers"),
        Some("Content-Type")
    );
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let app = TestGateway::new().await;

    for response in [
        app.server.get("/").await,
        app.server.put("/").await,
        app.server.delete("/").await,
    ] {
        assert_eq!(response.status_code(), 405);
        assert_eq!(response.text(), "Method not allowed");
        assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    }
}

#[tokio::test]
async fn malformed_json_is_rejected_before_forwarding() {
    let app = TestGateway::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.upstream)
        .await;

    let response = app.server.post("/").text("not json").await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn non_json_upstream_response_is_bad_gateway() {
    let app = TestGateway::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/")
        .json(&daily_query("000001.SZ", "20240101", "20240131"))
        .await;

    assert_eq!(response.status_code(), 502);
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert_eq!(app.metrics.upstream_failures_total.get(), 1);
}

#[tokio::test]
async fn concurrent_requests_are_forwarded_independently() {
    let app = TestGateway::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_envelope("X", &[])))
        .expect(3)
        .mount(&app.upstream)
        .await;

    let query = daily_query("000001.SZ", "20240101", "20240131");
    let (a, b, c) = tokio::join!(
        async { app.server.post("/").json(&query).await },
        async { app.server.post("/").json(&query).await },
        async { app.server.post("/").json(&query).await },
    );

    for response in [a, b, c] {
        assert_eq!(response.status_code(), 200);
    }
    assert_eq!(app.metrics.upstream_requests_total.get(), 3);
}

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestGateway::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "quotegrid-gateway");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestGateway::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("upstream_requests_total"));
}
