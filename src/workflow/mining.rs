//! Block production request.

use crate::ledger::client::LedgerApi;
use crate::wallet::KeyManager;
use crate::workflow::{Outcome, NO_KEYS};

pub const MINE_FAILED: &str = "Error mining block.";

/// Ask the server to mine a block credited to the local public key.
///
/// The server's reply is returned verbatim as a success; only transport
/// failures are errors.
pub async fn mine(keys: &KeyManager, ledger: &dyn LedgerApi) -> Outcome {
    let key_pair = match keys.load() {
        Ok(Some(pair)) => pair,
        Ok(None) => return Outcome::Error(NO_KEYS.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Could not load key pair");
            return Outcome::Error(format!("Could not load key pair: {}", e));
        }
    };

    match ledger.request_mine(&key_pair.public_key).await {
        Ok(reply) => {
            tracing::info!(message = %reply.message, "Mine request answered");
            Outcome::Success(reply.message)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error mining block");
            Outcome::Error(MINE_FAILED.to_string())
        }
    }
}
