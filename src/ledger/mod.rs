//! Ledger server integration.
//!
//! # Data Flow
//! ```text
//! TransactionDraft (transaction.rs)
//!     → Signer (wallet) → SignedTransaction
//!     → LedgerClient (client.rs) → POST /transactions/new
//!
//! GET /chain, GET /nodes
//!     → ChainSnapshot / NodeListSnapshot (types.rs)
//!     → sync loop
//! ```

pub mod client;
pub mod transaction;
pub mod types;

pub use client::{LedgerApi, LedgerClient};
pub use transaction::{SignedTransaction, TransactionDraft};
pub use types::{
    Block, BlockTransaction, ChainSnapshot, LedgerError, LedgerResult, NodeListSnapshot,
    ServerReply,
};
