//! Shutdown coordination for background tasks.

use tokio::sync::broadcast;

/// Broadcasts a single stop signal to every subscribed task.
///
/// The sync loop's periodic tasks each hold a receiver and leave their loop
/// when it fires. In-flight fetches are not cancelled.
#[derive(Debug)]
pub struct Shutdown {
    /// Fires once; every subscriber sees it.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a coordinator with no subscribers yet.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal all current subscribers. Tasks subscribing later are not affected.
    pub fn trigger(&self) {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(tasks = notified, "Shutdown triggered");
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
