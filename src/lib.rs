//! Ledger client library.
//!
//! Generates and stores a secp256k1 key pair, signs value transfers, submits
//! them to a ledger server over HTTP, requests block production, and keeps a
//! local view of the chain and peer list up to date by polling.

// Core subsystems
pub mod config;
pub mod context;
pub mod ledger;
pub mod sync;
pub mod view;
pub mod wallet;
pub mod workflow;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use context::ClientContext;
pub use ledger::{LedgerApi, LedgerClient};
pub use lifecycle::Shutdown;
