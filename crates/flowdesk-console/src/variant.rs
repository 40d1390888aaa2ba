/*
[INPUT]:  Task nodeType/taskType fields and file-submission flag
[OUTPUT]: Closed task variant and its fixed action set
[POS]:    Domain logic - variant classification
[UPDATE]: When the engine introduces new node kinds
*/

use flowdesk_adapter::{ActionKind, Task};

/// Behavioral category of a task, computed once when the action dialog
/// opens and switched on exhaustively afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskVariant {
    /// Approval node: the operator approves or denies.
    Approval,
    /// File prompt/review node: the operator confirms the files were seen.
    FileReview,
    /// Any other node; `allow_files` suppresses the reject path because a
    /// file-carrying completion is expected instead.
    Generic { allow_files: bool },
}

impl TaskVariant {
    /// Classify a task from its declared type fields.
    pub fn classify(task: &Task) -> Self {
        let node_type = task.node_type.as_deref().unwrap_or("");
        let task_type = task.task_type.as_deref().unwrap_or("");

        if node_type == "Approval" || task_type == "ApprovalTask" {
            return TaskVariant::Approval;
        }
        if matches!(node_type, "FileUploadPrompt" | "FileReviewTask")
            || matches!(task_type, "FileUploadPrompt" | "FileReviewTask")
        {
            return TaskVariant::FileReview;
        }
        TaskVariant::Generic {
            allow_files: task.task_data.allow_file_submission,
        }
    }

    /// The fixed action set for this variant, in button order.
    pub fn available_actions(self) -> &'static [ActionKind] {
        match self {
            TaskVariant::Approval => &[ActionKind::Approve, ActionKind::Deny],
            TaskVariant::FileReview => &[ActionKind::MarkAsReviewed],
            TaskVariant::Generic { allow_files: true } => &[ActionKind::Complete],
            TaskVariant::Generic { allow_files: false } => {
                &[ActionKind::Complete, ActionKind::Reject]
            }
        }
    }
}
