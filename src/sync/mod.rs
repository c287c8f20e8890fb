//! State synchronization with the ledger server.
//!
//! # Data Flow
//! ```text
//! ticker (poller.rs) ──spawn──▶ LedgerApi::fetch_*
//!                                    │
//!                      Ok ───────────┼──────── Err
//!                      ▼                        ▼
//!        DisplayState::show_chain/nodes   DisplayState::show_status
//!                      │                        │
//!                      └────────▶ View ◀────────┘
//! ```

pub mod display;
pub mod poller;

pub use display::DisplayState;
pub use poller::{Resource, SyncHandles, SyncLoop};
