/*
[INPUT]:  Task snapshot, pre-staged files, operator edits, gateway client
[OUTPUT]: Validated action submissions and modal phase transitions
[POS]:    Orchestration layer - task action dialog state machine
[UPDATE]: When the submit pipeline, action map, or timer semantics change
[UPDATE]: 2026-08-04 Collapse loading/error/success flags into ModalPhase
[UPDATE]: 2026-08-05 Gate submit on the variant action set
[UPDATE]: 2026-08-06 Move banner/auto-close deadlines onto the modal value
*/

use std::time::{Duration, Instant};

use flowdesk_adapter::{ActionKind, FlowdeskClient, FormFieldDefinition, Task, TaskActionRequest};
use tracing::{info, warn};

use crate::form::{FieldValue, FormState};
use crate::issue::{IssueDialog, IssueTick};
use crate::staging::{FileStaging, PreStagedFile, StagedFile};
use crate::variant::TaskVariant;

/// Transient banners clear themselves after this long.
pub const BANNER_CLEAR_DELAY: Duration = Duration::from_secs(4);
/// A successful action closes the dialog after this long.
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_millis(1500);

/// Single source of truth for the dialog's submission lifecycle.
///
/// The combination `loading == false` with an action in progress (and the
/// rest of the contradictory states the old ad-hoc flags allowed) is
/// unrepresentable here.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalPhase {
    Idle,
    Validating,
    Uploading(ActionKind),
    Submitting(ActionKind),
    Succeeded(String),
    Failed(String),
}

impl ModalPhase {
    /// Whether a submission is in flight. Hosts disable every triggering
    /// control while this is true; that disablement is the only
    /// concurrency-control mechanism the dialog needs.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            ModalPhase::Validating | ModalPhase::Uploading(_) | ModalPhase::Submitting(_)
        )
    }
}

/// What the host should do after a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTick {
    None,
    /// The success auto-close delay elapsed; drop the dialog.
    Close,
}

/// State machine behind the task action dialog.
///
/// Owns the form state, the staged files, the nested issue dialog, and the
/// banner/auto-close deadlines. Deadlines live on this value and die with
/// it, so a timer can never fire against a later task's dialog.
#[derive(Debug)]
pub struct ActionModal {
    task: Task,
    variant: TaskVariant,
    phase: ModalPhase,
    form: FormState,
    staging: FileStaging,
    comment: String,
    banner_deadline: Option<Instant>,
    close_deadline: Option<Instant>,
    issue: Option<IssueDialog>,
}

impl ActionModal {
    /// Open the dialog for a task snapshot.
    ///
    /// Seeds form values from the task's field definitions and stages any
    /// pre-generated files tagged with this task's id through the normal
    /// dedup path.
    pub fn open(task: Task, pre_staged: &[PreStagedFile]) -> Self {
        let variant = TaskVariant::classify(&task);
        let form = FormState::seed(&task.task_data.form_fields);

        let mut staging = FileStaging::new();
        for pre in pre_staged.iter().filter(|pre| pre.task_id == task.id) {
            staging.add(pre.file.clone());
        }

        Self {
            task,
            variant,
            phase: ModalPhase::Idle,
            form,
            staging,
            comment: String::new(),
            banner_deadline: None,
            close_deadline: None,
            issue: None,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn variant(&self) -> TaskVariant {
        self.variant
    }

    pub fn phase(&self) -> &ModalPhase {
        &self.phase
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn staging(&self) -> &FileStaging {
        &self.staging
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Record a form edit; clears only that field's standing error.
    pub fn set_field(&mut self, key: &str, value: FieldValue) {
        self.form.set_value(key, value);
    }

    /// Stage another file. Returns false on `(name, size)` duplicates.
    pub fn stage_file(&mut self, file: StagedFile) -> bool {
        self.staging.add(file)
    }

    /// Unstage the first file with this name.
    pub fn unstage_file(&mut self, name: &str) -> bool {
        self.staging.remove(name)
    }

    /// Whether an operator may still act on this task. Terminal statuses
    /// render the dialog read-only, including the issue entry point.
    pub fn can_action(&self) -> bool {
        self.task.status.is_actionable()
    }

    /// Action buttons to render, in order. Empty for read-only tasks.
    pub fn available_actions(&self) -> &'static [ActionKind] {
        if self.can_action() {
            self.variant.available_actions()
        } else {
            &[]
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Current transient banner, if any: `(text, is_error)`.
    pub fn banner(&self) -> Option<(&str, bool)> {
        match &self.phase {
            ModalPhase::Succeeded(message) => Some((message.as_str(), false)),
            ModalPhase::Failed(message) => Some((message.as_str(), true)),
            _ => None,
        }
    }

    /// Open the stacked issue dialog. Refused for read-only tasks.
    pub fn open_issue_dialog(&mut self) -> bool {
        if !self.can_action() {
            return false;
        }
        if self.issue.is_none() {
            self.issue = Some(IssueDialog::open(self.task.id.clone()));
        }
        true
    }

    pub fn issue_dialog(&self) -> Option<&IssueDialog> {
        self.issue.as_ref()
    }

    pub fn issue_dialog_mut(&mut self) -> Option<&mut IssueDialog> {
        self.issue.as_mut()
    }

    /// Dismiss the issue dialog. The parent dialog's state is untouched.
    pub fn close_issue_dialog(&mut self) {
        self.issue = None;
    }

    /// Run the full submit pipeline for one action.
    ///
    /// Order: local validation (no network on failure), sequential file
    /// uploads (first failure aborts the whole submission), then one
    /// gateway dispatch. Returns true when the action succeeded, which is
    /// the host's cue to fire its refresh hook.
    pub async fn submit(&mut self, client: &FlowdeskClient, action: ActionKind) -> bool {
        if self.is_loading() {
            return false;
        }
        if !self.available_actions().contains(&action) {
            warn!(task_id = %self.task.id, action = %action, "action not available for task");
            return false;
        }

        // Field definitions are a snapshot; clone so the form can be
        // validated while the task stays borrowed by self.
        let fields: Vec<FormFieldDefinition> = self.task.task_data.form_fields.clone();

        if action == ActionKind::Complete && !fields.is_empty() {
            self.phase = ModalPhase::Validating;
            if !self.form.validate(&fields) {
                // Per-field errors only; the global banner stays clear and
                // no network call is made.
                self.phase = ModalPhase::Idle;
                return false;
            }
        }

        let mut submitted_file_ids = None;
        if !self.staging.is_empty() && self.task.task_data.allow_file_submission {
            self.phase = ModalPhase::Uploading(action);
            match self.staging.upload_all(client).await {
                Ok(file_ids) => submitted_file_ids = Some(file_ids),
                Err(err) => {
                    self.fail(format!("File upload failed: {err}"));
                    return false;
                }
            }
        }

        self.phase = ModalPhase::Submitting(action);
        let outputs = (action == ActionKind::Complete && !fields.is_empty())
            .then(|| self.form.outputs(&fields));
        let request = TaskActionRequest {
            comments: self.comment.clone(),
            submitted_file_ids,
            outputs,
        };

        match client.submit_action(action, &self.task.id, &request).await {
            Ok(outcome) if outcome.success => {
                info!(task_id = %self.task.id, action = %action, "task action succeeded");
                self.succeed(success_message(action).to_string());
                true
            }
            Ok(outcome) => {
                let message = outcome
                    .message
                    .unwrap_or_else(|| format!("{action} failed"));
                self.fail(message);
                false
            }
            Err(err) => {
                self.fail(err.user_message());
                false
            }
        }
    }

    /// Advance the dialog's timers. Hosts call this from their tick loop.
    pub fn tick(&mut self) -> ModalTick {
        self.tick_at(Instant::now())
    }

    /// Timer advance with an explicit clock, the testable entry point.
    pub fn tick_at(&mut self, now: Instant) -> ModalTick {
        if let Some(dialog) = &mut self.issue {
            if dialog.tick_at(now) == IssueTick::Close {
                self.issue = None;
            }
        }

        if self.close_deadline.is_some_and(|deadline| now >= deadline) {
            self.close_deadline = None;
            return ModalTick::Close;
        }

        if self.banner_deadline.is_some_and(|deadline| now >= deadline) {
            self.banner_deadline = None;
            if matches!(self.phase, ModalPhase::Succeeded(_) | ModalPhase::Failed(_)) {
                self.phase = ModalPhase::Idle;
            }
        }

        ModalTick::None
    }

    /// Close the dialog. Refused while a submission is in flight; on
    /// success clears comment, staged files, form state, deadlines, and
    /// any open issue dialog.
    pub fn close(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.comment.clear();
        self.staging.clear();
        self.form = FormState::default();
        self.phase = ModalPhase::Idle;
        self.banner_deadline = None;
        self.close_deadline = None;
        self.issue = None;
        true
    }

    fn succeed(&mut self, message: String) {
        let now = Instant::now();
        self.phase = ModalPhase::Succeeded(message);
        self.banner_deadline = Some(now + BANNER_CLEAR_DELAY);
        self.close_deadline = Some(now + AUTO_CLOSE_DELAY);
    }

    fn fail(&mut self, message: String) {
        self.phase = ModalPhase::Failed(message);
        self.banner_deadline = Some(Instant::now() + BANNER_CLEAR_DELAY);
        self.close_deadline = None;
    }
}

fn success_message(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Complete => "Task completed!",
        ActionKind::Reject => "Task rejected!",
        ActionKind::Approve => "Task approved!",
        ActionKind::Deny => "Task denied!",
        ActionKind::MarkAsReviewed => "Task marked as reviewed!",
    }
}
