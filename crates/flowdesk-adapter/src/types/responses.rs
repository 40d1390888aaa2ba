/*
[INPUT]:  Heterogeneous engine response bodies
[OUTPUT]: Typed response structs and the normalized action outcome
[POS]:    Data layer - response types
[UPDATE]: When the engine response envelope or list shapes change
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::Task;

/// Raw response envelope as the engine sends it.
///
/// Older endpoints omit the `success` flag on 2xx responses, so every field
/// is optional here; `ActionOutcome` is the normalized form consumers use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Uniform `{success, message, data}` shape every action-style call
/// normalizes to. A 2xx body without an explicit flag counts as success.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl From<ApiEnvelope> for ActionOutcome {
    fn from(envelope: ApiEnvelope) -> Self {
        Self {
            success: envelope.success.unwrap_or(true),
            message: envelope.message,
            data: envelope.data,
        }
    }
}

impl ActionOutcome {
    /// Deserialize the `data` payload into a typed record, if present.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.data
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// The task record returned by an action call, when the engine echoes it.
    pub fn task(&self) -> Option<Task> {
        self.data_as()
    }
}

/// One page of the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedTasks {
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub total: u32,
    pub result: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_success_flag_normalizes_to_success() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"message": "ok"}"#).expect("envelope");
        let outcome = ActionOutcome::from(envelope);
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_explicit_failure_is_preserved() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success": false, "message": "task already closed"}"#)
                .expect("envelope");
        let outcome = ActionOutcome::from(envelope);
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("task already closed"));
    }

    #[test]
    fn test_data_as_round_trips_typed_payload() {
        let envelope: ApiEnvelope = serde_json::from_str(
            r#"{"success": true, "data": {"fileId": "f-1", "filename": "a.pdf"}}"#,
        )
        .expect("envelope");
        let outcome = ActionOutcome::from(envelope);
        let uploaded: super::super::models::UploadedFile =
            outcome.data_as().expect("typed data");
        assert_eq!(uploaded.file_id, "f-1");
    }
}
