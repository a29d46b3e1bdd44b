use thiserror::Error;

use crate::domain::InvoiceId;

/// Error type that captures ledger failures.
///
/// `NotFound`, `InvalidAmount` and `InvalidInput` are recoverable results reported
/// back to the caller. `Storage` means the persisted ledger could not be read or
/// written and the in-memory view can no longer be trusted.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invoice #{0} not found")]
    NotFound(InvoiceId),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns true when the error must be escalated instead of reported.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
