/*
[INPUT]:  Task queries and action payloads
[OUTPUT]: Task pages, single tasks, and normalized action outcomes
[POS]:    HTTP layer - task list and action endpoints
[UPDATE]: When adding list filters or changing the action dispatch table
*/

use reqwest::Method;
use tracing::debug;

use crate::http::{FlowdeskClient, Result};
use crate::types::{ActionKind, ActionOutcome, PaginatedTasks, Task, TaskActionRequest, TaskQuery};

impl FlowdeskClient {
    /// Query one page of tasks
    ///
    /// GET /api/tasks?page={page}&pageSize={pageSize}&status={status}
    pub async fn query_tasks(&self, query: &TaskQuery) -> Result<PaginatedTasks> {
        let mut params = vec![
            format!("page={}", query.page),
            format!("pageSize={}", query.page_size),
        ];
        if let Some(status) = query.status {
            let status_value = serde_json::to_string(&status)
                .unwrap_or_default()
                .trim_matches('"')
                .to_string();
            params.push(format!("status={}", status_value));
        }

        let endpoint = format!("/api/tasks?{}", params.join("&"));
        let builder = self.api_request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Fetch a single task record
    ///
    /// GET /api/tasks/{id}
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        let endpoint = format!("/api/tasks/{}", task_id);
        let builder = self.api_request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Dispatch one of the five task actions
    ///
    /// POST /api/tasks/{id}/{complete|reject|approve|deny}
    ///
    /// `MarkAsReviewed` posts to the complete endpoint; the engine treats a
    /// file-review completion as an ordinary completion. Responses are
    /// normalized to `{success, message, data}` even when the endpoint
    /// omits the explicit flag.
    pub async fn submit_action(
        &self,
        action: ActionKind,
        task_id: &str,
        request: &TaskActionRequest,
    ) -> Result<ActionOutcome> {
        let endpoint = format!("/api/tasks/{}/{}", task_id, action.verb());
        debug!(task_id, verb = action.verb(), "dispatching task action");

        let builder = self.api_request(Method::POST, &endpoint)?.json(request);
        self.send_envelope(builder).await
    }
}
