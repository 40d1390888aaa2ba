/*
[INPUT]:  Mock engine responses with controlled latency
[OUTPUT]: Test results for refresh triggering and the in-flight guard
[POS]:    Integration tests - refresh coordination
[UPDATE]: When refresh triggers or polling change
*/

use std::sync::Arc;
use std::time::Duration;

use flowdesk_adapter::{FlowdeskClient, TaskQuery, TaskStatus};
use flowdesk_console::refresh::{RefreshEvent, Refresher};
use tokio::sync::{mpsc, watch};
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn empty_page(page: u32) -> serde_json::Value {
    serde_json::json!({
        "page": page,
        "pageSize": 20,
        "total": 0,
        "result": [],
    })
}

fn counters_body() -> serde_json::Value {
    serde_json::json!({
        "pending": 3,
        "inProgress": 1,
        "needsRework": 0,
        "completed": 12,
    })
}

async fn mount_snapshot_mocks(server: &MockServer, expected_tasks: u64) {
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page(1)))
        .expect(expected_tasks)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/counters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(counters_body()))
        .expect(expected_tasks)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_trigger_delivers_snapshot() {
    let server = MockServer::start().await;
    mount_snapshot_mocks(&server, 1).await;

    let client = Arc::new(assert_ok!(FlowdeskClient::new(&server.uri())));
    let (_query_tx, query_rx) = watch::channel(TaskQuery::default());
    let (event_tx, mut event_rx) = mpsc::channel(4);
    let refresher = Refresher::new(client, query_rx, event_tx);

    assert!(refresher.trigger());
    match event_rx.recv().await.expect("event") {
        RefreshEvent::Snapshot { tasks, counters } => {
            assert_eq!(tasks.total, 0);
            assert_eq!(counters.pending, 3);
        }
        RefreshEvent::Failed(message) => panic!("unexpected failure: {message}"),
    }
}

#[tokio::test]
async fn test_trigger_uses_current_page_and_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(query_param("page", "3"))
        .and(query_param("status", "NeedsRework"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page(3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/counters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(counters_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(assert_ok!(FlowdeskClient::new(&server.uri())));
    let (query_tx, query_rx) = watch::channel(TaskQuery::default());
    let (event_tx, mut event_rx) = mpsc::channel(4);
    let refresher = Refresher::new(client, query_rx, event_tx);

    query_tx.send_modify(|query| {
        query.page = 3;
        query.status = Some(TaskStatus::NeedsRework);
    });

    assert!(refresher.trigger());
    let event = event_rx.recv().await.expect("event");
    assert!(matches!(event, RefreshEvent::Snapshot { .. }));
}

#[tokio::test]
async fn test_in_flight_guard_skips_overlapping_cycles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(empty_page(1))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/counters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(counters_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(assert_ok!(FlowdeskClient::new(&server.uri())));
    let (_query_tx, query_rx) = watch::channel(TaskQuery::default());
    let (event_tx, mut event_rx) = mpsc::channel(4);
    let refresher = Refresher::new(client, query_rx, event_tx);

    assert!(refresher.trigger());
    // The first fetch is still held by the 300ms delay; this cycle is skipped.
    assert!(!refresher.trigger());

    let event = event_rx.recv().await.expect("event");
    assert!(matches!(event, RefreshEvent::Snapshot { .. }));
    // Exactly one snapshot was produced.
    assert!(event_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_failure_is_reported_and_guard_released() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "message": "engine unavailable",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(assert_ok!(FlowdeskClient::new(&server.uri())));
    let (_query_tx, query_rx) = watch::channel(TaskQuery::default());
    let (event_tx, mut event_rx) = mpsc::channel(4);
    let refresher = Refresher::new(client, query_rx, event_tx);

    assert!(refresher.trigger());
    match event_rx.recv().await.expect("event") {
        RefreshEvent::Failed(message) => assert_eq!(message, "engine unavailable"),
        RefreshEvent::Snapshot { .. } => panic!("expected failure event"),
    }
    // The guard is released after a failed fetch.
    assert!(refresher.trigger());
}

#[tokio::test]
async fn test_poller_fires_immediately_and_stops_on_cancel() {
    let server = MockServer::start().await;
    mount_snapshot_mocks(&server, 1).await;

    let client = Arc::new(assert_ok!(FlowdeskClient::new(&server.uri())));
    let (_query_tx, query_rx) = watch::channel(TaskQuery::default());
    let (event_tx, mut event_rx) = mpsc::channel(4);
    let refresher = Refresher::new(client, query_rx, event_tx);

    let shutdown = CancellationToken::new();
    let poller = refresher.spawn_poller(Duration::from_secs(3600), shutdown.clone());

    // The first tick fires immediately, giving the view its initial data.
    let event = event_rx.recv().await.expect("initial snapshot");
    assert!(matches!(event, RefreshEvent::Snapshot { .. }));

    shutdown.cancel();
    assert_ok!(poller.await);
}
