//! Shared utilities for integration tests: a programmable mock ledger server
//! and a view that records what it was asked to render.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use ledger_client::ledger::{ChainSnapshot, NodeListSnapshot};
use ledger_client::view::{StatusMessage, View};

/// A request body received by the mock, with its request id header.
#[derive(Debug, Clone)]
pub struct Posted {
    pub path: &'static str,
    pub body: Value,
    pub request_id: Option<String>,
}

/// Mutable behaviour of the mock ledger.
pub struct MockState {
    pub chain: Mutex<Value>,
    /// Scripted `/chain` responses served before falling back to `chain`.
    pub chain_script: Mutex<VecDeque<(Duration, Value)>>,
    pub chain_status: AtomicU16,
    pub chain_hits: AtomicUsize,
    pub nodes: Mutex<Value>,
    pub nodes_status: AtomicU16,
    pub reply_status: AtomicU16,
    pub reply_body: Mutex<String>,
    pub posted: Mutex<Vec<Posted>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            chain: Mutex::new(json!({ "chain": [] })),
            chain_script: Mutex::new(VecDeque::new()),
            chain_status: AtomicU16::new(200),
            chain_hits: AtomicUsize::new(0),
            nodes: Mutex::new(json!({ "nodes": [] })),
            nodes_status: AtomicU16::new(200),
            reply_status: AtomicU16::new(201),
            reply_body: Mutex::new(json!({ "message": "ok" }).to_string()),
            posted: Mutex::new(Vec::new()),
        }
    }
}

impl MockState {
    pub fn set_chain(&self, chain: Value) {
        *self.chain.lock().unwrap() = chain;
    }

    pub fn script_chain(&self, delay: Duration, chain: Value) {
        self.chain_script.lock().unwrap().push_back((delay, chain));
    }

    pub fn set_nodes(&self, nodes: Value) {
        *self.nodes.lock().unwrap() = nodes;
    }

    pub fn set_reply(&self, status: u16, body: impl Into<String>) {
        self.reply_status.store(status, Ordering::SeqCst);
        *self.reply_body.lock().unwrap() = body.into();
    }

    pub fn posted(&self) -> Vec<Posted> {
        self.posted.lock().unwrap().clone()
    }

    pub fn chain_hits(&self) -> usize {
        self.chain_hits.load(Ordering::SeqCst)
    }
}

type Shared = Arc<MockState>;

fn status_of(code: &AtomicU16) -> StatusCode {
    StatusCode::from_u16(code.load(Ordering::SeqCst)).unwrap_or(StatusCode::OK)
}

async fn chain_handler(State(state): State<Shared>) -> (StatusCode, Json<Value>) {
    state.chain_hits.fetch_add(1, Ordering::SeqCst);
    let scripted = state.chain_script.lock().unwrap().pop_front();
    if let Some((delay, body)) = scripted {
        tokio::time::sleep(delay).await;
        return (StatusCode::OK, Json(body));
    }
    let body = state.chain.lock().unwrap().clone();
    (status_of(&state.chain_status), Json(body))
}

async fn nodes_handler(State(state): State<Shared>) -> (StatusCode, Json<Value>) {
    let body = state.nodes.lock().unwrap().clone();
    (status_of(&state.nodes_status), Json(body))
}

fn record(state: &MockState, path: &'static str, headers: &HeaderMap, body: Value) -> (StatusCode, String) {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.posted.lock().unwrap().push(Posted {
        path,
        body,
        request_id,
    });
    let reply = state.reply_body.lock().unwrap().clone();
    (status_of(&state.reply_status), reply)
}

async fn transaction_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record(&state, "/transactions/new", &headers, body)
}

async fn mine_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record(&state, "/mine", &headers, body)
}

/// Start a mock ledger on an ephemeral port.
pub async fn start_mock_ledger() -> (SocketAddr, Shared) {
    let state: Shared = Arc::new(MockState::default());
    let app = Router::new()
        .route("/chain", get(chain_handler))
        .route("/nodes", get(nodes_handler))
        .route("/transactions/new", post(transaction_handler))
        .route("/mine", post(mine_handler))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, state)
}

/// JSON for a chain of `len` blocks.
pub fn chain_json(len: u64) -> Value {
    let blocks: Vec<Value> = (1..=len)
        .map(|i| {
            json!({
                "index": i,
                "timestamp": 1_700_000_000.0 + i as f64,
                "previous_hash": format!("{:064x}", i - 1),
                "proof": 100 + i,
                "transactions": [{ "sender": "0", "recipient": "miner", "amount": 1 }]
            })
        })
        .collect();
    json!({ "chain": blocks, "length": len })
}

/// Records renders for assertions.
#[derive(Default)]
pub struct RecordingView {
    pub chains: Mutex<Vec<ChainSnapshot>>,
    pub nodes: Mutex<Vec<NodeListSnapshot>>,
    pub statuses: Mutex<Vec<StatusMessage>>,
}

impl RecordingView {
    pub fn last_status(&self) -> Option<StatusMessage> {
        self.statuses.lock().unwrap().last().cloned()
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

/// Poll `check` every 10ms until it holds or `timeout` elapses.
pub async fn eventually<F: Fn() -> bool>(timeout: Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
