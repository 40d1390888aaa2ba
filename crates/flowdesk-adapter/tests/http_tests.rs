/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client endpoints and normalization
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use common::{mock_auth_token, setup_mock_server, task_json};
use flowdesk_adapter::{
    ActionKind, ClientConfig, FlowdeskClient, FlowdeskError, TaskActionRequest, TaskQuery,
    TaskStatus,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(FlowdeskClient::new("https://engine.example.com"));
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(FlowdeskClient::with_config(
        config,
        "https://engine.example.com"
    ));
}

#[test]
fn test_client_token_roundtrip() {
    let mut client = assert_ok!(FlowdeskClient::new("https://engine.example.com"));
    assert!(client.auth_token().is_none());

    client.set_auth_token(mock_auth_token());
    assert_eq!(client.auth_token(), Some(mock_auth_token().as_str()));
}

#[tokio::test]
async fn test_query_tasks_builds_filter_params() {
    let server = setup_mock_server().await;
    let page = serde_json::json!({
        "page": 2,
        "pageSize": 10,
        "total": 11,
        "result": [task_json("t-1", "Pending")]
    });

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "10"))
        .and(query_param("status", "Pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let query = TaskQuery {
        page: 2,
        page_size: 10,
        status: Some(TaskStatus::Pending),
    };

    let result = assert_ok!(client.query_tasks(&query).await);
    assert_eq!(result.total, 11);
    assert_eq!(result.result.len(), 1);
    assert_eq!(result.result[0].status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_submit_action_sends_bearer_and_body() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/tasks/t-7/approve"))
        .and(header("authorization", format!("Bearer {}", mock_auth_token()).as_str()))
        .and(body_json(serde_json::json!({"comments": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": task_json("t-7", "Completed"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = assert_ok!(FlowdeskClient::new(&server.uri()));
    client.set_auth_token(mock_auth_token());

    let outcome = assert_ok!(
        client
            .submit_action(ActionKind::Approve, "t-7", &TaskActionRequest::default())
            .await
    );
    assert!(outcome.success);
    let task = outcome.task().expect("echoed task");
    assert_eq!(task.status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_mark_as_reviewed_hits_complete_endpoint() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/tasks/t-3/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let outcome = assert_ok!(
        client
            .submit_action(
                ActionKind::MarkAsReviewed,
                "t-3",
                &TaskActionRequest::default()
            )
            .await
    );
    assert!(outcome.success);
}

#[tokio::test]
async fn test_missing_success_flag_counts_as_success() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/tasks/t-4/reject"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "task rejected"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let outcome = assert_ok!(
        client
            .submit_action(ActionKind::Reject, "t-4", &TaskActionRequest::default())
            .await
    );
    assert!(outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("task rejected"));
}

#[tokio::test]
async fn test_business_failure_is_not_an_error() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/tasks/t-5/deny"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "task already closed",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let outcome = assert_ok!(
        client
            .submit_action(ActionKind::Deny, "t-5", &TaskActionRequest::default())
            .await
    );
    assert!(!outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("task already closed"));
}

#[tokio::test]
async fn test_error_status_surfaces_remote_message() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/tasks/t-6/complete"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "success": false,
            "message": "task is locked by another reviewer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let err = client
        .submit_action(ActionKind::Complete, "t-6", &TaskActionRequest::default())
        .await
        .expect_err("conflict should error");

    match err {
        FlowdeskError::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "task is locked by another reviewer");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_body_uses_status_line() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let err = client.get_task("missing").await.expect_err("404");
    match err {
        FlowdeskError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_file_returns_server_record() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"fileId": "f-42", "filename": "evidence.pdf"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let uploaded = assert_ok!(client.upload_file("evidence.pdf", b"%PDF-1.4".to_vec()).await);
    assert_eq!(uploaded.file_id, "f-42");
    assert_eq!(uploaded.filename, "evidence.pdf");
}

#[tokio::test]
async fn test_upload_rejection_carries_remote_message() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "file type not accepted",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let err = client
        .upload_file("malware.exe", vec![0u8; 16])
        .await
        .expect_err("rejected upload");
    assert!(err.to_string().contains("file type not accepted"));
}

#[tokio::test]
async fn test_download_resolves_content_disposition_filename() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/files/f-1/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"report.pdf\"")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let file = assert_ok!(client.download_file("f-1", "fallback.bin").await);
    assert_eq!(file.filename, "report.pdf");
    assert_eq!(file.bytes, b"%PDF-1.4".to_vec());
}

#[tokio::test]
async fn test_download_falls_back_to_caller_name() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/files/f-2/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let file = assert_ok!(client.download_file("f-2", "generated.docx").await);
    assert_eq!(file.filename, "generated.docx");
    assert_eq!(file.bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_report_issue_posts_task_id_and_description() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .and(body_json(serde_json::json!({
            "taskId": "t-9",
            "description": "attachment is corrupted",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "issue recorded",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let request = flowdesk_adapter::IssueReportRequest {
        task_id: "t-9".to_string(),
        description: "attachment is corrupted".to_string(),
    };
    let outcome = assert_ok!(client.report_issue(&request).await);
    assert!(outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("issue recorded"));
}

#[tokio::test]
async fn test_query_counters() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/counters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pending": 4,
            "inProgress": 2,
            "needsRework": 1,
            "completed": 33,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(FlowdeskClient::new(&server.uri()));
    let counters = assert_ok!(client.query_counters().await);
    assert_eq!(counters.pending, 4);
    assert_eq!(counters.in_progress, 2);
    assert_eq!(counters.needs_rework, 1);
    assert_eq!(counters.completed, 33);
}
