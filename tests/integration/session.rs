//! Integration tests for the query session against a mocked gateway

use quotegrid::render::{Column, ColumnSet};
use quotegrid::services::GatewayClient;
use quotegrid::session::{QueryInput, QuerySession, SessionError, FAILURE_MESSAGE};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{daily_envelope, daily_query, error_envelope};

fn input() -> QueryInput {
    QueryInput::new("000001.SZ", "2024-01-03", "2024-01-05")
}

fn session_for(gateway: &MockServer) -> QuerySession<GatewayClient> {
    QuerySession::new(GatewayClient::new(gateway.uri()))
}

#[tokio::test]
async fn successful_query_produces_snapshot() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(daily_query("000001.SZ", "20240103", "20240105")))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_envelope(
            "000001.SZ",
            &[("20240105", 110.0), ("20240104", 100.0), ("20240103", 90.0)],
        )))
        .expect(1)
        .mount(&gateway)
        .await;

    let mut session = session_for(&gateway);
    let snapshot = session.submit(&input()).await.expect("query succeeds");

    assert!(!session.is_loading());
    assert_eq!(snapshot.records.len(), 3);
    assert_eq!(snapshot.records[0].ts_code.as_deref(), Some("000001.SZ"));
    assert_eq!(snapshot.records[0].ma3.map(|v| v.to_string()), Some("100.00".to_string()));
    assert!(snapshot.records[1].ma3.is_none());
    assert!(snapshot.records[2].ma3.is_none());
    assert_eq!(
        snapshot.records[0].change_percent.map(|v| v.to_string()),
        Some("10.00".to_string())
    );
    assert!(snapshot.records[2].change_percent.is_none());

    assert_eq!(snapshot.summary.trading_days, 3);
    assert_eq!(snapshot.summary.period_high, Some(111.0));
    assert_eq!(snapshot.summary.period_low, Some(89.0));

    let table = snapshot.table(&ColumnSet::default());
    assert_eq!(table.cell(0, Column::Date).unwrap().text, "20240105");

    let current = session.current().expect("snapshot kept");
    assert!(Arc::ptr_eq(&current, &snapshot));
}

#[tokio::test]
async fn validation_failure_makes_no_request() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gateway)
        .await;

    let mut session = session_for(&gateway);
    let err = session
        .submit(&QueryInput::new("", "2024-01-03", "2024-01-05"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation(_)));
    assert!(session.current().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn failed_query_keeps_previous_snapshot() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_envelope(
            "000001.SZ",
            &[("20240105", 10.0), ("20240104", 9.0)],
        )))
        .up_to_n_times(1)
        .mount(&gateway)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&gateway)
        .await;

    let mut session = session_for(&gateway);
    let first = session.submit(&input()).await.expect("first query succeeds");

    let err = session.submit(&input()).await.unwrap_err();
    assert!(matches!(err, SessionError::Query(_)));
    assert_eq!(err.user_message(), FAILURE_MESSAGE);
    assert!(!session.is_loading());

    let current = session.current().expect("previous snapshot kept");
    assert!(Arc::ptr_eq(&current, &first));
    assert_eq!(current.records.len(), 2);
}

#[tokio::test]
async fn provider_error_envelope_fails_the_query() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(error_envelope(40101, "rate limited")),
        )
        .mount(&gateway)
        .await;

    let mut session = session_for(&gateway);
    let err = session.submit(&input()).await.unwrap_err();

    assert!(matches!(err, SessionError::Query(_)));
    assert!(err.to_string().contains("rate limited"));
    assert!(session.current().is_none());
}

#[tokio::test]
async fn unreachable_gateway_fails_the_query() {
    let mut session = QuerySession::new(GatewayClient::new("http://127.0.0.1:9/"));
    let err = session.submit(&input()).await.unwrap_err();

    assert!(matches!(err, SessionError::Query(_)));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn abandoned_query_clears_loading_state() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(daily_envelope("000001.SZ", &[("20240105", 110.0)]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&gateway)
        .await;

    let mut session = session_for(&gateway);
    let loading = session.loading_state();
    assert!(!loading.is_loading());

    let observer = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        loading.is_loading()
    };
    let query = input();
    let (outcome, seen_in_flight) = tokio::join!(
        tokio::time::timeout(Duration::from_millis(300), session.submit(&query)),
        observer
    );

    assert!(outcome.is_err(), "query should have been abandoned");
    assert!(seen_in_flight);
    assert!(!loading.is_loading());
    assert!(!session.is_loading());
    assert!(session.current().is_none());
}
