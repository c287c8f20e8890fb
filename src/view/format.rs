//! Plain-text rendering of snapshots.

use chrono::{DateTime, Local};

use crate::ledger::transaction::format_amount;
use crate::ledger::types::{Block, ChainSnapshot, NodeListSnapshot};

pub const NO_NODES: &str = "No nodes registered.";

pub fn chain_lines(chain: &ChainSnapshot) -> Vec<String> {
    chain.chain.iter().flat_map(block_lines).collect()
}

pub fn block_lines(block: &Block) -> Vec<String> {
    let mut lines = vec![
        format!("Block {}", block.index),
        format!("  Timestamp: {}", format_timestamp(block.timestamp)),
        format!("  Previous Hash: {}", block.previous_hash),
        format!("  Proof: {}", block.proof),
        "  Transactions:".to_string(),
    ];
    lines.extend(block.transactions.iter().map(|tx| {
        format!(
            "    {} -> {}: {}",
            tx.sender,
            tx.recipient,
            format_amount(tx.amount)
        )
    }));
    lines
}

pub fn node_lines(nodes: &NodeListSnapshot) -> Vec<String> {
    if nodes.is_empty() {
        return vec![NO_NODES.to_string()];
    }
    nodes.nodes.iter().map(|n| format!("- {}", n)).collect()
}

/// Local time for a unix-seconds timestamp; falls back to the raw number.
pub fn format_timestamp(timestamp: f64) -> String {
    if !timestamp.is_finite() {
        return timestamp.to_string();
    }
    let secs = timestamp.trunc() as i64;
    let nanos = (timestamp.fract().abs() * 1e9) as u32;
    match DateTime::from_timestamp(secs, nanos) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => timestamp.to_string(),
    }
}
