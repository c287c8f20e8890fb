//! User-initiated actions: transaction submission and mining.
//!
//! Both end in an [`Outcome`] that the caller turns into the status message.
//! Errors never escape an action.

pub mod mining;
pub mod submission;

use crate::view::StatusMessage;

pub use mining::mine;
pub use submission::{Submission, SubmissionState, TransactionForm};

pub const NO_KEYS: &str = "Please generate keys first.";

/// Terminal result of a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Error(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(m) | Outcome::Error(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn to_status(&self) -> StatusMessage {
        match self {
            Outcome::Success(m) => StatusMessage::info(m.clone()),
            Outcome::Error(m) => StatusMessage::error(m.clone()),
        }
    }
}
