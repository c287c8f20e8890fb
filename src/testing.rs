//! In-crate test doubles.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::ledger::client::LedgerApi;
use crate::ledger::transaction::SignedTransaction;
use crate::ledger::types::{
    Block, ChainSnapshot, LedgerError, LedgerResult, NodeListSnapshot, ServerReply,
};
use crate::view::{StatusMessage, View};

/// A chain of `len` empty blocks.
pub fn chain_of(len: usize) -> ChainSnapshot {
    ChainSnapshot {
        chain: (0..len as u64)
            .map(|i| Block {
                index: i + 1,
                timestamp: 1_700_000_000.0 + i as f64,
                previous_hash: format!("{:064x}", i),
                proof: 100 + i,
                transactions: Vec::new(),
            })
            .collect(),
    }
}

/// Records everything it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingView {
    chains: Mutex<Vec<ChainSnapshot>>,
    nodes: Mutex<Vec<NodeListSnapshot>>,
    statuses: Mutex<Vec<StatusMessage>>,
}

impl RecordingView {
    pub fn chains(&self) -> Vec<ChainSnapshot> {
        self.chains.lock().unwrap().clone()
    }

    pub fn nodes(&self) -> Vec<NodeListSnapshot> {
        self.nodes.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().iter().map(|s| s.text.clone()).collect()
    }
}

impl View for RecordingView {
    fn render_chain(&self, chain: &ChainSnapshot) {
        self.chains.lock().unwrap().push(chain.clone());
    }

    fn render_nodes(&self, nodes: &NodeListSnapshot) {
        self.nodes.lock().unwrap().push(nodes.clone());
    }

    fn render_status(&self, status: &StatusMessage) {
        self.statuses.lock().unwrap().push(status.clone());
    }
}

/// Ledger that replays scripted responses. Unscripted calls fail with a
/// transport error.
#[derive(Default)]
pub struct ScriptedLedger {
    chain: Mutex<VecDeque<(Duration, LedgerResult<ChainSnapshot>)>>,
    nodes: Mutex<VecDeque<LedgerResult<NodeListSnapshot>>>,
    replies: Mutex<VecDeque<LedgerResult<ServerReply>>>,
    submitted: Mutex<Vec<SignedTransaction>>,
    mined_by: Mutex<Vec<String>>,
    chain_calls: AtomicUsize,
    node_calls: AtomicUsize,
}

impl ScriptedLedger {
    pub fn push_chain(&self, delay: Duration, result: LedgerResult<ChainSnapshot>) {
        self.chain.lock().unwrap().push_back((delay, result));
    }

    pub fn push_nodes(&self, result: LedgerResult<NodeListSnapshot>) {
        self.nodes.lock().unwrap().push_back(result);
    }

    pub fn push_reply(&self, result: LedgerResult<ServerReply>) {
        self.replies.lock().unwrap().push_back(result);
    }

    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn mined_by(&self) -> Vec<String> {
        self.mined_by.lock().unwrap().clone()
    }

    pub fn chain_calls(&self) -> usize {
        self.chain_calls.load(Ordering::SeqCst)
    }

    pub fn node_calls(&self) -> usize {
        self.node_calls.load(Ordering::SeqCst)
    }

    /// Any network activity at all.
    pub fn total_calls(&self) -> usize {
        self.chain_calls() + self.node_calls() + self.submitted().len() + self.mined_by().len()
    }

    fn next_reply(&self) -> LedgerResult<ServerReply> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}

fn unscripted() -> LedgerError {
    LedgerError::Transport("unscripted call".to_string())
}

#[async_trait]
impl LedgerApi for ScriptedLedger {
    async fn fetch_chain(&self) -> LedgerResult<ChainSnapshot> {
        self.chain_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.chain.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Err(unscripted()),
        }
    }

    async fn fetch_nodes(&self) -> LedgerResult<NodeListSnapshot> {
        self.node_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.nodes.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(unscripted()))
    }

    async fn submit_transaction(&self, tx: SignedTransaction) -> LedgerResult<ServerReply> {
        self.submitted.lock().unwrap().push(tx);
        self.next_reply()
    }

    async fn request_mine(&self, miner_public_key: &str) -> LedgerResult<ServerReply> {
        self.mined_by.lock().unwrap().push(miner_public_key.to_string());
        self.next_reply()
    }
}
