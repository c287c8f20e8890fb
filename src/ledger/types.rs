//! Wire types for the ledger HTTP API and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A transfer as recorded inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTransaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

/// A block as returned by `GET /chain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    /// Unix seconds; servers commonly send a fractional value.
    pub timestamp: f64,
    pub previous_hash: String,
    pub proof: u64,
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
}

/// Full ledger view from one poll. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
}

impl ChainSnapshot {
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn tip(&self) -> Option<&Block> {
        self.chain.last()
    }
}

/// Registered peer addresses from one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeListSnapshot {
    #[serde(default)]
    pub nodes: Vec<String>,
}

impl NodeListSnapshot {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Reply to a submission or mine request. Shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerReply {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MineRequest<'a> {
    pub miner_public_key: &'a str,
}

/// Errors from a single exchange with the ledger server.
///
/// Every variant is a network error from the user's point of view: the
/// request did not produce a usable response.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Connection, DNS or I/O failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request did not settle within the configured timeout.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Server answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// Response body was not the expected shape.
    #[error("could not decode {endpoint} response: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },

    /// The configured base URL is unusable.
    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
