//! Transaction submission workflow.
//!
//! # States
//! ```text
//! Idle → Validating → Signing → Submitting → Done(Success | Error)
//!            │            │
//!            └────────────┴──────────────→ Done(Error)   (no network call)
//! ```
//!
//! Every run builds and signs a brand-new draft. Retrying after a failure
//! submits a second, independent transaction; nothing is deduplicated.

use crate::ledger::client::LedgerApi;
use crate::ledger::transaction::TransactionDraft;
use crate::observability::metrics;
use crate::wallet::{KeyManager, Signer, WalletError};
use crate::workflow::{Outcome, NO_KEYS};

pub const RECIPIENT_REQUIRED: &str = "Recipient is required.";
pub const INVALID_AMOUNT: &str = "Amount must be a positive number.";
pub const SEND_FAILED: &str = "Error sending transaction.";

/// Raw user input. Cleared after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    /// Recipient public key as typed.
    pub recipient: String,
    /// Amount as typed; parsed during validation.
    pub amount: String,
}

impl TransactionForm {
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    pub fn reset(&mut self) {
        self.recipient.clear();
        self.amount.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.recipient.is_empty() && self.amount.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Signing,
    Submitting,
    Done(Outcome),
}

/// One submission attempt against a key manager and a ledger.
pub struct Submission<'a> {
    keys: &'a KeyManager,
    ledger: &'a dyn LedgerApi,
    state: SubmissionState,
}

impl<'a> Submission<'a> {
    pub fn new(keys: &'a KeyManager, ledger: &'a dyn LedgerApi) -> Self {
        Self {
            keys,
            ledger,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!(from = ?self.state, to = ?next, "Submission state change");
        self.state = next;
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        metrics::record_submission(if outcome.is_success() { "success" } else { "error" });
        self.transition(SubmissionState::Done(outcome.clone()));
        outcome
    }

    /// Validate, sign and post the form. Resets the form on success.
    pub async fn run(&mut self, form: &mut TransactionForm) -> Outcome {
        self.transition(SubmissionState::Validating);

        let key_pair = match self.keys.load() {
            Ok(Some(pair)) => pair,
            Ok(None) => return self.finish(Outcome::Error(NO_KEYS.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, "Could not load key pair");
                return self.finish(Outcome::Error(format!("Could not load key pair: {}", e)));
            }
        };

        let recipient = form.recipient.trim();
        if recipient.is_empty() {
            return self.finish(Outcome::Error(RECIPIENT_REQUIRED.to_string()));
        }

        let amount = match form.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => amount,
            _ => return self.finish(Outcome::Error(INVALID_AMOUNT.to_string())),
        };

        self.transition(SubmissionState::Signing);

        let draft = TransactionDraft::new(key_pair.public_key.clone(), recipient, amount);
        let signed = match Signer::new(&key_pair).and_then(|signer| signer.sign(draft)) {
            Ok(signed) => signed,
            Err(WalletError::InvalidAmount(_)) => {
                return self.finish(Outcome::Error(INVALID_AMOUNT.to_string()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Signing failed");
                return self.finish(Outcome::Error(format!("Signing failed: {}", e)));
            }
        };

        self.transition(SubmissionState::Submitting);

        match self.ledger.submit_transaction(signed).await {
            Ok(reply) => {
                tracing::info!(message = %reply.message, "Transaction submitted");
                form.reset();
                self.finish(Outcome::Success(reply.message))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error sending transaction");
                self.finish(Outcome::Error(SEND_FAILED.to_string()))
            }
        }
    }
}
