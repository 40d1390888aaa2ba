/*
[INPUT]:  Wire-level enum values from the workflow engine
[OUTPUT]: Closed Rust enums shared by requests, responses, and the console
[POS]:    Data layer - enumerations
[UPDATE]: When the engine adds task states, field kinds, or action verbs
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task as reported by the workflow engine.
///
/// The client never writes this field; it only observes the value the
/// engine returns after an action call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    NeedsRework,
    Completed,
    Rejected,
    Cancelled,
    Failed,
}

impl TaskStatus {
    /// Whether an operator may still act on a task in this status.
    /// Terminal and errored tasks are read-only.
    pub fn is_actionable(self) -> bool {
        matches!(
            self,
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::NeedsRework
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in progress",
            TaskStatus::NeedsRework => "needs rework",
            TaskStatus::Completed => "completed",
            TaskStatus::Rejected => "rejected",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Task priority assigned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.write_str(label)
    }
}

/// Whether a task is assigned to a single user or to a role queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssigneeKind {
    User,
    Role,
}

/// The five mutually exclusive task dispositions.
///
/// `MarkAsReviewed` completes a file-review task and dispatches to the
/// same remote operation as `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Complete,
    Reject,
    Approve,
    Deny,
    MarkAsReviewed,
}

impl ActionKind {
    /// Path segment of the remote action endpoint.
    pub fn verb(self) -> &'static str {
        match self {
            ActionKind::Complete | ActionKind::MarkAsReviewed => "complete",
            ActionKind::Reject => "reject",
            ActionKind::Approve => "approve",
            ActionKind::Deny => "deny",
        }
    }

    /// Button label shown by hosts.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Complete => "Complete",
            ActionKind::Reject => "Reject",
            ActionKind::Approve => "Approve",
            ActionKind::Deny => "Deny",
            ActionKind::MarkAsReviewed => "Mark as Reviewed",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input kind of a dynamically declared form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Boolean,
    Integer,
    Float,
}

impl FieldKind {
    pub fn is_boolean(self) -> bool {
        matches!(self, FieldKind::Boolean)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Float)
    }
}
