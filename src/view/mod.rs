//! Presentation boundary.
//!
//! The core hands complete snapshots to a [`View`]; how they are drawn is the
//! view's business. `format.rs` turns snapshots into text lines shared by the
//! terminal view and anything else that wants plain text.

pub mod format;
pub mod terminal;

use crate::ledger::types::{ChainSnapshot, NodeListSnapshot};

pub use terminal::TerminalView;

/// Most recent user-facing outcome. Overwritten, never queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders snapshots. Implementations must be callable from any task.
pub trait View: Send + Sync {
    fn render_chain(&self, chain: &ChainSnapshot);
    fn render_nodes(&self, nodes: &NodeListSnapshot);
    fn render_status(&self, status: &StatusMessage);
}
