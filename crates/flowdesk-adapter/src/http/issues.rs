/*
[INPUT]:  Issue descriptions tied to a task id
[OUTPUT]: Normalized outcome of the issue-report call
[POS]:    HTTP layer - issue reporting side-channel
[UPDATE]: When the issue endpoint or its body shape changes
*/

use reqwest::Method;
use tracing::debug;

use crate::http::{FlowdeskClient, Result};
use crate::types::{ActionOutcome, IssueReportRequest};

impl FlowdeskClient {
    /// File an issue against a task
    ///
    /// POST /api/issues with body `{taskId, description}`. Uniqueness and
    /// ownership are enforced server-side; the console only guarantees a
    /// non-empty description.
    pub async fn report_issue(&self, request: &IssueReportRequest) -> Result<ActionOutcome> {
        debug!(task_id = %request.task_id, "reporting issue");
        let builder = self.api_request(Method::POST, "/api/issues")?.json(request);
        self.send_envelope(builder).await
    }
}
