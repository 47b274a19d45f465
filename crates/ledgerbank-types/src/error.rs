//! Error types for LedgerBank
//!
//! Every business-rule rejection has its own variant. Anything raised by the
//! persistence engine collapses into `StorageFailure` with a descriptive string.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for LedgerBank operations
pub type BankResult<T> = std::result::Result<T, BankError>;

/// LedgerBank error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    // ========================================================================
    // Business rule errors
    // ========================================================================

    /// Amount was zero or negative
    #[error("Amount must be positive.")]
    InvalidAmount,

    /// Result does not fit in a balance
    #[error("Amount too large.")]
    AmountOverflow,

    /// Balance does not cover the requested debit
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    /// Sender and receiver are the same account
    #[error("Cannot transfer to self.")]
    SelfTransfer,

    /// Transfer target does not exist
    #[error("Receiver account not found.")]
    ReceiverNotFound,

    /// Account still holds money and cannot be closed
    #[error("Cannot close account with remaining balance of {balance}. Please withdraw funds first.")]
    NonZeroBalance { balance: Decimal },

    /// Unique key already taken (admin usernames)
    #[error("{0} already exists.")]
    AlreadyExists(String),

    /// Unknown account
    #[error("{0} not found.")]
    NotFound(String),

    /// Boundary validation failure (pin format, empty message, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // Storage errors
    // ========================================================================

    /// Any failure raised by the persistence engine or the filesystem
    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl BankError {
    /// Whether the error is a business-rule rejection rather than a storage fault
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::StorageFailure(_))
    }
}

impl From<std::io::Error> for BankError {
    fn from(e: std::io::Error) -> Self {
        BankError::StorageFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejection_classification() {
        assert!(BankError::InvalidAmount.is_rejection());
        assert!(BankError::NonZeroBalance { balance: dec!(50) }.is_rejection());
        assert!(BankError::AmountOverflow.is_rejection());
        assert!(!BankError::StorageFailure("disk full".to_string()).is_rejection());
    }

    #[test]
    fn test_messages_carry_context() {
        let err = BankError::InsufficientFunds {
            available: dec!(10.50),
            requested: dec!(20),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: available 10.50, requested 20"
        );
        assert_eq!(
            BankError::AlreadyExists("Admin 'root'".to_string()).to_string(),
            "Admin 'root' already exists."
        );
    }
}
