/*
[INPUT]:  Console-side action, issue, and query parameters
[OUTPUT]: Serializable request bodies for the engine API
[POS]:    Data layer - request types
[UPDATE]: When action payload fields or list filters change
*/

use serde::Serialize;
use serde_json::{Map, Value};

use super::enums::TaskStatus;

/// Body of the five task action calls.
///
/// `submitted_file_ids` is present only when the submission uploaded files;
/// `outputs` only when a completion carries form results. Absent fields are
/// omitted from the wire body entirely.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskActionRequest {
    pub comments: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_file_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Map<String, Value>>,
}

/// Body of the issue-report call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReportRequest {
    pub task_id: String,
    pub description: String,
}

/// Page/filter state of a task list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub page: u32,
    pub page_size: u32,
    pub status: Option<TaskStatus>,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_request_omits_absent_fields() {
        let req = TaskActionRequest {
            comments: String::new(),
            submitted_file_ids: None,
            outputs: None,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json, serde_json::json!({"comments": ""}));
    }

    #[test]
    fn test_action_request_camel_cases_file_ids() {
        let req = TaskActionRequest {
            comments: "done".to_string(),
            submitted_file_ids: Some(vec!["f-1".to_string()]),
            outputs: None,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"comments": "done", "submittedFileIds": ["f-1"]})
        );
    }
}
