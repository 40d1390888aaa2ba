/*
[INPUT]:  Gateway client, current list query, cancellation token
[OUTPUT]: Task-list/counter snapshots delivered to the host view
[POS]:    Coordination layer - post-action refresh and dashboard polling
[UPDATE]: When refresh triggers or polling cadence change
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use flowdesk_adapter::{DashboardCounters, FlowdeskClient, PaginatedTasks, TaskQuery};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fixed dashboard polling cadence; the config file can override it.
pub const DASHBOARD_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Snapshot or failure delivered to the host's event loop.
#[derive(Debug)]
pub enum RefreshEvent {
    Snapshot {
        tasks: PaginatedTasks,
        counters: DashboardCounters,
    },
    Failed(String),
}

/// Re-fetch coordinator the host view satisfies the refresh contract with.
///
/// After any successful action or issue report the host calls `trigger`;
/// the same trigger drives the fixed-interval dashboard poll. One boolean
/// in-flight guard covers both paths, so overlapping fetches cannot pile
/// up under a slow network.
#[derive(Clone)]
pub struct Refresher {
    client: Arc<FlowdeskClient>,
    query: watch::Receiver<TaskQuery>,
    events: mpsc::Sender<RefreshEvent>,
    in_flight: Arc<AtomicBool>,
}

impl Refresher {
    pub fn new(
        client: Arc<FlowdeskClient>,
        query: watch::Receiver<TaskQuery>,
        events: mpsc::Sender<RefreshEvent>,
    ) -> Self {
        Self {
            client,
            query,
            events,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Kick off one re-fetch of the task list (at its current page/filter)
    /// plus the dashboard counters. Returns false when a previous refresh
    /// is still unresolved; that cycle is skipped, not queued.
    pub fn trigger(&self) -> bool {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("refresh already in flight; skipping cycle");
            return false;
        }

        let this = self.clone();
        tokio::spawn(async move {
            let query = this.query.borrow().clone();
            let event = match fetch_snapshot(&this.client, &query).await {
                Ok((tasks, counters)) => RefreshEvent::Snapshot { tasks, counters },
                Err(err) => {
                    warn!(error = %err, "refresh fetch failed");
                    RefreshEvent::Failed(err.user_message())
                }
            };
            this.in_flight.store(false, Ordering::SeqCst);
            let _ = this.events.send(event).await;
        });
        true
    }

    /// Run the fixed-interval dashboard poll until the token is cancelled.
    /// The first tick fires immediately, giving the view its initial data.
    pub fn spawn_poller(
        &self,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        debug!("dashboard poller shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        this.trigger();
                    }
                }
            }
        })
    }
}

async fn fetch_snapshot(
    client: &FlowdeskClient,
    query: &TaskQuery,
) -> flowdesk_adapter::Result<(PaginatedTasks, DashboardCounters)> {
    let tasks = client.query_tasks(query).await?;
    let counters = client.query_counters().await?;
    Ok((tasks, counters))
}
