/*
[INPUT]:  Task id, operator-entered description, gateway client
[OUTPUT]: Issue-report submissions and dialog phase transitions
[POS]:    Orchestration layer - issue reporting subflow
[UPDATE]: When the report flow or its timers change
*/

use std::time::{Duration, Instant};

use flowdesk_adapter::{FlowdeskClient, IssueReportRequest};
use tracing::info;

use crate::controller::BANNER_CLEAR_DELAY;

/// A successful report closes the dialog after this long.
pub const ISSUE_AUTO_CLOSE_DELAY: Duration = Duration::from_secs(2);

/// Lifecycle of the issue dialog, independent of the parent dialog's phase.
#[derive(Debug, Clone, PartialEq)]
pub enum IssuePhase {
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

/// What the parent should do after a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueTick {
    None,
    Close,
}

/// Mini state machine for filing an issue against the open task.
///
/// Stacked above the action dialog; its state never leaks into the parent
/// and the parent's never leaks in here.
#[derive(Debug)]
pub struct IssueDialog {
    task_id: String,
    description: String,
    phase: IssuePhase,
    banner_deadline: Option<Instant>,
    close_deadline: Option<Instant>,
}

impl IssueDialog {
    pub fn open(task_id: String) -> Self {
        Self {
            task_id,
            description: String::new(),
            phase: IssuePhase::Idle,
            banner_deadline: None,
            close_deadline: None,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn phase(&self) -> &IssuePhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, IssuePhase::Submitting)
    }

    /// Current transient banner, if any: `(text, is_error)`.
    pub fn banner(&self) -> Option<(&str, bool)> {
        match &self.phase {
            IssuePhase::Succeeded(message) => Some((message.as_str(), false)),
            IssuePhase::Failed(message) => Some((message.as_str(), true)),
            _ => None,
        }
    }

    /// Submit the report. An empty-after-trim description fails locally
    /// with no network call. Returns true on success, the parent's cue to
    /// fire the refresh hook (an issue can change queue visibility).
    pub async fn submit(&mut self, client: &FlowdeskClient) -> bool {
        if self.is_loading() {
            return false;
        }

        let description = self.description.trim();
        if description.is_empty() {
            self.fail("Issue description cannot be empty.".to_string());
            return false;
        }

        self.phase = IssuePhase::Submitting;
        let request = IssueReportRequest {
            task_id: self.task_id.clone(),
            description: description.to_string(),
        };

        match client.report_issue(&request).await {
            Ok(outcome) if outcome.success => {
                info!(task_id = %self.task_id, "issue reported");
                let message = outcome
                    .message
                    .unwrap_or_else(|| "Issue reported!".to_string());
                let now = Instant::now();
                self.phase = IssuePhase::Succeeded(message);
                self.banner_deadline = Some(now + BANNER_CLEAR_DELAY);
                self.close_deadline = Some(now + ISSUE_AUTO_CLOSE_DELAY);
                true
            }
            Ok(outcome) => {
                let message = outcome
                    .message
                    .unwrap_or_else(|| "issue report failed".to_string());
                self.fail(message);
                false
            }
            Err(err) => {
                self.fail(err.user_message());
                false
            }
        }
    }

    /// Timer advance with an explicit clock.
    pub fn tick_at(&mut self, now: Instant) -> IssueTick {
        if self.close_deadline.is_some_and(|deadline| now >= deadline) {
            self.close_deadline = None;
            return IssueTick::Close;
        }
        if self.banner_deadline.is_some_and(|deadline| now >= deadline) {
            self.banner_deadline = None;
            if matches!(self.phase, IssuePhase::Succeeded(_) | IssuePhase::Failed(_)) {
                self.phase = IssuePhase::Idle;
            }
        }
        IssueTick::None
    }

    fn fail(&mut self, message: String) {
        self.phase = IssuePhase::Failed(message);
        self.banner_deadline = Some(Instant::now() + BANNER_CLEAR_DELAY);
        self.close_deadline = None;
    }
}
