//! Periodic refresh of the chain and node views.
//!
//! # Behaviour
//! - One immediate refresh of both resources at start
//! - Two independent tickers, one per resource, same interval
//! - Each tick spawns its fetch and returns; slow fetches may overlap
//! - Whichever fetch completes last overwrites the display
//! - Failures are reported and the schedule continues unchanged

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::ledger::client::LedgerApi;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::sync::display::DisplayState;
use crate::view::StatusMessage;

pub const CHAIN_FETCH_ERROR: &str = "Error fetching blockchain data.";
pub const NODES_FETCH_ERROR: &str = "Error fetching node list.";

/// What a refresh task pulls from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Chain,
    Nodes,
}

impl Resource {
    fn label(self) -> &'static str {
        match self {
            Resource::Chain => "chain",
            Resource::Nodes => "nodes",
        }
    }
}

/// Handles of the two periodic tasks.
#[derive(Debug)]
pub struct SyncHandles {
    pub chain: JoinHandle<()>,
    pub nodes: JoinHandle<()>,
}

impl SyncHandles {
    /// Wait for both tasks to exit after shutdown has been triggered.
    pub async fn join(self) {
        let (chain, nodes) = tokio::join!(self.chain, self.nodes);
        for result in [chain, nodes] {
            if let Err(e) = result {
                tracing::error!(error = %e, "Sync task ended abnormally");
            }
        }
    }
}

/// Keeps the displayed chain and node list in step with the server.
#[derive(Clone)]
pub struct SyncLoop {
    /// Source of snapshots.
    ledger: Arc<dyn LedgerApi>,
    /// Where fetched snapshots and failures are shown.
    display: Arc<DisplayState>,
    /// Time between ticks, shared by both resources.
    interval: Duration,
}

impl SyncLoop {
    /// Create a loop; nothing runs until [`start`](Self::start).
    pub fn new(ledger: Arc<dyn LedgerApi>, display: Arc<DisplayState>, interval: Duration) -> Self {
        Self {
            ledger,
            display,
            interval,
        }
    }

    /// Refresh both resources now, then start the periodic tasks.
    pub fn start(&self, shutdown: &Shutdown) -> SyncHandles {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Sync loop starting");

        self.spawn_refresh(Resource::Chain);
        self.spawn_refresh(Resource::Nodes);

        SyncHandles {
            chain: tokio::spawn(self.clone().run_periodic(Resource::Chain, shutdown.subscribe())),
            nodes: tokio::spawn(self.clone().run_periodic(Resource::Nodes, shutdown.subscribe())),
        }
    }

    /// Fire-and-forget refresh. The handle is only useful to tests and
    /// callers that want to wait.
    pub fn spawn_refresh(&self, resource: Resource) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            this.refresh(resource).await;
        })
    }

    /// Fetch one resource and publish it, or report the failure and keep
    /// the previous snapshot.
    pub async fn refresh(&self, resource: Resource) {
        match resource {
            Resource::Chain => match self.ledger.fetch_chain().await {
                Ok(chain) => {
                    metrics::record_sync_tick("chain", "ok");
                    tracing::debug!(blocks = chain.len(), "Chain refreshed");
                    self.display.show_chain(chain);
                }
                Err(e) => {
                    metrics::record_sync_tick("chain", "error");
                    tracing::warn!(error = %e, "Error fetching chain");
                    self.display.show_status(StatusMessage::error(CHAIN_FETCH_ERROR));
                }
            },
            Resource::Nodes => match self.ledger.fetch_nodes().await {
                Ok(nodes) => {
                    metrics::record_sync_tick("nodes", "ok");
                    tracing::debug!(nodes = nodes.nodes.len(), "Node list refreshed");
                    self.display.show_nodes(nodes);
                }
                Err(e) => {
                    metrics::record_sync_tick("nodes", "error");
                    tracing::warn!(error = %e, "Error fetching nodes");
                    self.display.show_status(StatusMessage::error(NODES_FETCH_ERROR));
                }
            },
        }
    }

    async fn run_periodic(self, resource: Resource, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.spawn_refresh(resource);
                }
                _ = shutdown.recv() => {
                    tracing::info!(resource = resource.label(), "Sync task received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

impl std::fmt::Debug for SyncLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncLoop")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
