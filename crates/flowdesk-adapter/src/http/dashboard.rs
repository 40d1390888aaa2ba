/*
[INPUT]:  Authenticated counter queries
[OUTPUT]: Aggregate task counts for the dashboard header
[POS]:    HTTP layer - dashboard endpoints
[UPDATE]: When new aggregates are exposed by the engine
*/

use reqwest::Method;

use crate::http::{FlowdeskClient, Result};
use crate::types::DashboardCounters;

impl FlowdeskClient {
    /// Query aggregate task counters
    ///
    /// GET /api/dashboard/counters
    pub async fn query_counters(&self) -> Result<DashboardCounters> {
        let builder = self.api_request(Method::GET, "/api/dashboard/counters")?;
        self.send_json(builder).await
    }
}
