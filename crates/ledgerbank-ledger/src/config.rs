//! Ledger configuration

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business constants for the ledger and its reports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Rate applied by the interest sweep
    pub interest_rate: Decimal,
    /// Smallest balance that qualifies for a loan
    pub loan_min_balance: Decimal,
    /// Loan ceiling as a multiple of the balance
    pub loan_multiplier: Decimal,
    /// Rows shown by the mini statement
    pub history_limit: u32,
    /// Directory the CSV report is written to
    pub export_dir: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            interest_rate: Decimal::new(5, 2),
            loan_min_balance: Decimal::from(5_000),
            loan_multiplier: Decimal::from(5),
            history_limit: 10,
            export_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.interest_rate.to_string(), "0.05");
        assert_eq!(config.loan_min_balance, Decimal::from(5_000));
        assert_eq!(config.loan_multiplier, Decimal::from(5));
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }
}
