//! Transaction and complaint records
//!
//! Both are append-only. The account holder's name is copied into each row at
//! write time so history stays readable after the account is archived.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountNumber, BankError};

/// Kind of balance movement recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferSent,
    TransferReceived,
    InterestCredit,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 5] = [
        Self::Deposit,
        Self::Withdrawal,
        Self::TransferSent,
        Self::TransferReceived,
        Self::InterestCredit,
    ];

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
            Self::TransferSent => "TRANSFER_SENT",
            Self::TransferReceived => "TRANSFER_RECEIVED",
            Self::InterestCredit => "INTEREST_CREDIT",
        }
    }

    /// Whether this kind increases the balance
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            Self::Deposit | Self::TransferReceived | Self::InterestCredit
        )
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BankError::InvalidInput(format!("Unknown transaction type: {}", s)))
    }
}

/// One row of the transaction ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub account_number: AccountNumber,
    pub name: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,
}

/// A customer complaint or feedback message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: i64,
    pub account_number: AccountNumber,
    pub name: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_round_trip() {
        for kind in TransactionKind::ALL {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
        assert!("REFUND".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_credit_classification() {
        assert!(TransactionKind::InterestCredit.is_credit());
        assert!(TransactionKind::TransferReceived.is_credit());
        assert!(!TransactionKind::Withdrawal.is_credit());
        assert!(!TransactionKind::TransferSent.is_credit());
    }

    #[test]
    fn test_serde_uses_stored_names() {
        let json = serde_json::to_string(&TransactionKind::TransferSent).unwrap();
        assert_eq!(json, "\"TRANSFER_SENT\"");
    }
}
