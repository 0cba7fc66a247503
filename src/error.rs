// 🚨 Error taxonomy for consolidation and scoring
//
// Loading and CLI code wrap these in anyhow with context; the core
// returns them directly so callers can match on the variant.

use thiserror::Error;

pub type Result<T, E = FiscalError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FiscalError {
    /// A transaction has a malformed `date` or `amount`.
    #[error("Transaction {index}: invalid {field}: {message}")]
    Validation {
        index: usize,
        field: &'static str,
        message: String,
    },

    /// The scorer was asked to normalize over zero transactions.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FiscalError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FiscalError::Validation { .. })
    }
}
