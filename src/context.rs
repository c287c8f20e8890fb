//! Client context: every component, created once at startup.
//!
//! Actions run here convert their outcome into the single status message.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::ledger::client::{LedgerApi, LedgerClient};
use crate::ledger::types::LedgerError;
use crate::lifecycle::Shutdown;
use crate::sync::{DisplayState, Resource, SyncHandles, SyncLoop};
use crate::view::{StatusMessage, View};
use crate::wallet::{FileKeyStore, KeyManager, KeyPair, WalletError};
use crate::workflow::{self, Outcome, Submission, TransactionForm};

pub const KEYS_GENERATED: &str = "Generated new key pair.";

/// Errors building the context from configuration.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Everything a user action needs, built once at startup.
pub struct ClientContext {
    /// Persisted key pair access.
    keys: KeyManager,
    /// Server used by every action.
    ledger: Arc<dyn LedgerApi>,
    /// Shared with the sync loop.
    display: Arc<DisplayState>,
    /// Periodic and on-demand refreshes.
    sync: SyncLoop,
}

impl ClientContext {
    /// Assemble a context from already-built parts.
    pub fn new(
        keys: KeyManager,
        ledger: Arc<dyn LedgerApi>,
        view: Arc<dyn View>,
        interval: Duration,
    ) -> Self {
        let display = Arc::new(DisplayState::new(view));
        let sync = SyncLoop::new(ledger.clone(), display.clone(), interval);
        Self {
            keys,
            ledger,
            display,
            sync,
        }
    }

    /// Wire the file key store and HTTP client described by `config`.
    pub fn from_config(config: &ClientConfig, view: Arc<dyn View>) -> Result<Self, ContextError> {
        let store = FileKeyStore::open(Path::new(&config.keystore.path))?;
        let ledger = LedgerClient::new(&config.server)?;

        tracing::info!(
            server = %ledger.base_url(),
            keystore = %store.path().display(),
            interval_ms = config.sync.interval_ms,
            "Client context created"
        );

        Ok(Self::new(
            KeyManager::new(Arc::new(store)),
            Arc::new(ledger),
            view,
            Duration::from_millis(config.sync.interval_ms),
        ))
    }

    pub fn keys(&self) -> &KeyManager {
        &self.keys
    }

    pub fn display(&self) -> &Arc<DisplayState> {
        &self.display
    }

    pub fn sync(&self) -> &SyncLoop {
        &self.sync
    }

    /// Stored key pair, if any. Load failures are reported as status.
    pub fn load_keys(&self) -> Option<KeyPair> {
        match self.keys.load() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load key pair");
                self.display
                    .show_status(StatusMessage::error(format!("Could not load key pair: {}", e)));
                None
            }
        }
    }

    /// Create and persist a new pair, replacing the old one.
    pub fn generate_keys(&self) -> Outcome {
        let outcome = match self.keys.generate() {
            Ok(_) => Outcome::Success(KEYS_GENERATED.to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Could not persist key pair");
                Outcome::Error(format!("Could not save key pair: {}", e))
            }
        };
        self.display.show_status(outcome.to_status());
        outcome
    }

    pub async fn submit(&self, form: &mut TransactionForm) -> Outcome {
        let outcome = Submission::new(&self.keys, self.ledger.as_ref()).run(form).await;
        self.display.show_status(outcome.to_status());
        outcome
    }

    /// Request a block; on any server reply, refresh the chain right away.
    pub async fn mine(&self) -> Outcome {
        let outcome = workflow::mine(&self.keys, self.ledger.as_ref()).await;
        self.display.show_status(outcome.to_status());
        if outcome.is_success() {
            self.sync.refresh(Resource::Chain).await;
        }
        outcome
    }

    pub fn start_sync(&self, shutdown: &Shutdown) -> SyncHandles {
        self.sync.start(shutdown)
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("sync", &self.sync)
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}
