/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for flowdesk-adapter tests

use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock bearer token for testing
pub fn mock_auth_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

/// Minimal engine task JSON with the given id and status
#[allow(dead_code)]
pub fn task_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": "Review supplier invoice",
        "status": status,
        "nodeType": "Approval",
        "priority": "Normal",
        "assignedToType": "User",
        "assignedToId": "u-1",
        "taskData": {
            "formFields": [],
            "allowFileSubmission": false
        }
    })
}
