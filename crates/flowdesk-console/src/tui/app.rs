/*
[INPUT]:  Refresh snapshots, key-driven selection, action dialog lifecycle
[OUTPUT]: AppState helpers for TUI rendering and dialog control
[POS]:    TUI app state and snapshot management
[UPDATE]: When view state, paging, or dialog wiring changes
*/

use std::sync::Arc;

use flowdesk_adapter::{DashboardCounters, FlowdeskClient, PaginatedTasks, Task, TaskQuery, TaskStatus};
use tokio::sync::watch;

use crate::controller::ActionModal;
use crate::refresh::Refresher;
use crate::staging::PreStagedFile;

/// Main application state for the console view.
pub(super) struct AppState {
    pub client: Arc<FlowdeskClient>,
    pub refresher: Refresher,
    query_tx: watch::Sender<TaskQuery>,

    /// Current task page as last delivered by a refresh
    pub tasks: Vec<Task>,
    pub total_tasks: u32,
    pub counters: DashboardCounters,

    /// Selected row in the task list
    pub selected_index: usize,
    /// Status line shown in the footer
    pub status_message: String,

    /// Open action dialog, if any
    pub modal: Option<ActionModal>,
    /// Focus position inside the action dialog
    pub modal_focus: usize,
    /// Focus position inside the stacked issue dialog
    pub issue_focus: usize,
    /// Path entry buffer for the attach-file control
    pub attach_input: String,

    /// Files generated for specific tasks before their dialog opened
    pub pre_staged: Vec<PreStagedFile>,
}

impl AppState {
    pub(super) fn new(
        client: Arc<FlowdeskClient>,
        refresher: Refresher,
        query_tx: watch::Sender<TaskQuery>,
    ) -> Self {
        Self {
            client,
            refresher,
            query_tx,
            tasks: Vec::new(),
            total_tasks: 0,
            counters: DashboardCounters::default(),
            selected_index: 0,
            status_message: String::from("loading tasks..."),
            modal: None,
            modal_focus: 0,
            issue_focus: 0,
            attach_input: String::new(),
            pre_staged: Vec::new(),
        }
    }

    pub(super) fn query(&self) -> TaskQuery {
        self.query_tx.borrow().clone()
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected_index)
    }

    /// Fold a refresh snapshot into the view, keeping the selection in range.
    pub(super) fn apply_snapshot(&mut self, tasks: PaginatedTasks, counters: DashboardCounters) {
        self.total_tasks = tasks.total;
        self.tasks = tasks.result;
        self.counters = counters;
        if self.selected_index >= self.tasks.len() {
            self.selected_index = self.tasks.len().saturating_sub(1);
        }
        self.status_message = format!(
            "page {} | {} of {} tasks",
            tasks.page,
            self.tasks.len(),
            self.total_tasks
        );
    }

    pub(super) fn select_next(&mut self) {
        if !self.tasks.is_empty() && self.selected_index + 1 < self.tasks.len() {
            self.selected_index += 1;
        }
    }

    pub(super) fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Open the action dialog for the selected task.
    pub(super) fn open_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        self.modal = Some(ActionModal::open(task, &self.pre_staged));
        self.modal_focus = 0;
        self.issue_focus = 0;
        self.attach_input.clear();
    }

    /// Close the action dialog if the controller allows it.
    pub(super) fn close_modal(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            if modal.close() {
                self.modal = None;
                self.attach_input.clear();
            }
        }
    }

    pub(super) fn next_page(&mut self) {
        let query = self.query();
        let last_page = self.total_tasks.div_ceil(query.page_size.max(1)).max(1);
        if query.page < last_page {
            self.query_tx.send_modify(|query| query.page += 1);
            self.refresher.trigger();
        }
    }

    pub(super) fn prev_page(&mut self) {
        if self.query().page > 1 {
            self.query_tx.send_modify(|query| query.page -= 1);
            self.refresher.trigger();
        }
    }

    /// Rotate the status filter through the actionable statuses.
    pub(super) fn cycle_status_filter(&mut self) {
        self.query_tx.send_modify(|query| {
            query.status = match query.status {
                None => Some(TaskStatus::Pending),
                Some(TaskStatus::Pending) => Some(TaskStatus::InProgress),
                Some(TaskStatus::InProgress) => Some(TaskStatus::NeedsRework),
                _ => None,
            };
            query.page = 1;
        });
        self.refresher.trigger();
    }
}
