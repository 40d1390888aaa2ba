/*
[INPUT]:  Engine JSON payloads (camelCase)
[OUTPUT]: Typed task, form, file, and dashboard models
[POS]:    Data layer - domain models
[UPDATE]: When the engine schema changes or new record kinds appear
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AssigneeKind, FieldKind, Priority, TaskStatus};

/// A unit of human work emitted by the workflow engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Workflow node kind this task was emitted from; one of the two
    /// inputs to variant classification.
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to_type: AssigneeKind,
    pub assigned_to_id: String,
    #[serde(default)]
    pub task_data: TaskData,
}

/// Variant-specific payload embedded in a task.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    #[serde(default)]
    pub form_fields: Vec<FormFieldDefinition>,
    #[serde(default)]
    pub allow_file_submission: bool,
    #[serde(default)]
    pub accepted_file_types: Option<String>,
    /// File references attached upstream (file-review variants).
    #[serde(default)]
    pub file_ids: Vec<String>,
}

/// One dynamically declared form field.
///
/// Immutable for the lifetime of an open action dialog; `key` is unique
/// within a task and becomes the output map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldDefinition {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Comma-separated option list, select fields only.
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FormFieldDefinition {
    /// Split the comma-separated option string into trimmed entries.
    pub fn option_list(&self) -> Vec<String> {
        self.options
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Server-side record of an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_id: String,
    pub filename: String,
}

/// A downloaded file with its resolved filename.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Issue filed against a task through the reporting side-channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    #[serde(default)]
    pub id: Option<String>,
    pub task_id: String,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate task counts backing the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounters {
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub needs_rework: u64,
    #[serde(default)]
    pub completed: u64,
}
