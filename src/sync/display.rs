//! Displayed state: the latest chain, node list and status.
//!
//! Each cell is overwritten wholesale. Store and render happen under one
//! render lock, so when two refreshes race the last one to store is also the
//! last one drawn, regardless of which request was issued first. Readers go
//! through the cells and never wait on a render.

use arc_swap::ArcSwapOption;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ledger::types::{ChainSnapshot, NodeListSnapshot};
use crate::view::{StatusMessage, View};

/// Latest snapshots plus the view they are drawn on.
pub struct DisplayState {
    /// Last chain snapshot that was shown.
    chain: ArcSwapOption<ChainSnapshot>,
    /// Last node list that was shown.
    nodes: ArcSwapOption<NodeListSnapshot>,
    /// Last status message that was shown.
    status: ArcSwapOption<StatusMessage>,
    /// Injected presentation layer.
    view: Arc<dyn View>,
    /// Held across store + render so draws land in store order.
    render_lock: Mutex<()>,
}

impl DisplayState {
    /// Create an empty display drawing on `view`.
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            chain: ArcSwapOption::empty(),
            nodes: ArcSwapOption::empty(),
            status: ArcSwapOption::empty(),
            view,
            render_lock: Mutex::new(()),
        }
    }

    /// Replace the chain snapshot and draw it.
    pub fn show_chain(&self, snapshot: ChainSnapshot) {
        let _guard = self.lock_render();
        let snapshot = Arc::new(snapshot);
        self.chain.store(Some(snapshot.clone()));
        self.view.render_chain(&snapshot);
    }

    /// Replace the node list and draw it.
    pub fn show_nodes(&self, snapshot: NodeListSnapshot) {
        let _guard = self.lock_render();
        let snapshot = Arc::new(snapshot);
        self.nodes.store(Some(snapshot.clone()));
        self.view.render_nodes(&snapshot);
    }

    /// Replace the status line and draw it.
    pub fn show_status(&self, status: StatusMessage) {
        let _guard = self.lock_render();
        let status = Arc::new(status);
        self.status.store(Some(status.clone()));
        self.view.render_status(&status);
    }

    fn lock_render(&self) -> MutexGuard<'_, ()> {
        // A panicking view leaves nothing half-written in `()`
        self.render_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn chain(&self) -> Option<Arc<ChainSnapshot>> {
        self.chain.load_full()
    }

    pub fn nodes(&self) -> Option<Arc<NodeListSnapshot>> {
        self.nodes.load_full()
    }

    pub fn status(&self) -> Option<Arc<StatusMessage>> {
        self.status.load_full()
    }
}

impl std::fmt::Debug for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayState")
            .field("chain_blocks", &self.chain.load_full().map(|c| c.len()))
            .field("nodes", &self.nodes.load_full().map(|n| n.nodes.len()))
            .field("status", &self.status.load_full())
            .finish()
    }
}
