//! Terminal view: prints each snapshot as it arrives.

use std::io::Write;

use crate::ledger::types::{ChainSnapshot, NodeListSnapshot};
use crate::view::format::{chain_lines, node_lines};
use crate::view::{StatusMessage, View};

/// Writes snapshots to stdout, one section per render call.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }

    fn print_section(&self, title: &str, lines: &[String]) {
        // Holding the lock keeps a section together when tasks render concurrently
        let mut handle = std::io::stdout().lock();
        let _ = writeln!(handle, "== {} ==", title);
        for line in lines {
            let _ = writeln!(handle, "{}", line);
        }
        let _ = handle.flush();
    }
}

impl View for TerminalView {
    fn render_chain(&self, chain: &ChainSnapshot) {
        let title = format!("Chain ({} blocks)", chain.len());
        self.print_section(&title, &chain_lines(chain));
    }

    fn render_nodes(&self, nodes: &NodeListSnapshot) {
        self.print_section("Nodes", &node_lines(nodes));
    }

    fn render_status(&self, status: &StatusMessage) {
        let title = if status.is_error { "Error" } else { "Status" };
        self.print_section(title, &[status.text.clone()]);
    }
}
