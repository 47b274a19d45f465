//! Read-side queries, the CSV report and complaints

use std::fs;
use std::path::PathBuf;

use ledgerbank_db::{ComplaintRepo, Database, DbError};
use ledgerbank_types::{
    ist_now, Account, AccountNumber, ArchivedAccount, BankError, BankResult, Complaint,
    TransactionRecord,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::not_found;
use crate::LedgerConfig;

/// File name of the transaction report
pub const REPORT_FILE_NAME: &str = "bank_transactions_report.csv";

/// Header row of the transaction report
pub const REPORT_HEADER: [&str; 6] = [
    "ID",
    "Account Number",
    "Name",
    "Type",
    "Amount",
    "Timestamp (IST)",
];

/// Result of a loan eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEligibility {
    pub eligible: bool,
    pub max_loan_amount: Decimal,
}

/// Reporting and history queries
#[derive(Clone)]
pub struct Reports {
    db: Database,
    config: LedgerConfig,
}

impl Reports {
    pub fn new(db: Database, config: LedgerConfig) -> Self {
        Self { db, config }
    }

    /// Current balance, zero for unknown accounts
    pub async fn get_balance(&self, account: AccountNumber) -> BankResult<Decimal> {
        Ok(self
            .db
            .account_repo()
            .balance(account)
            .await?
            .unwrap_or(Decimal::ZERO))
    }

    /// Holder name, used to confirm a transfer receiver
    pub async fn account_name(&self, account: AccountNumber) -> BankResult<Option<String>> {
        Ok(self.db.account_repo().name(account).await?)
    }

    /// Latest `limit` movements, newest first
    pub async fn get_history(
        &self,
        account: AccountNumber,
        limit: u32,
    ) -> BankResult<Vec<TransactionRecord>> {
        Ok(self.db.transaction_repo().history(account, limit).await?)
    }

    /// Mini statement using the configured row count
    pub async fn recent_history(&self, account: AccountNumber) -> BankResult<Vec<TransactionRecord>> {
        self.get_history(account, self.config.history_limit).await
    }

    pub async fn check_loan_eligibility(&self, account: AccountNumber) -> BankResult<LoanEligibility> {
        let balance = self.get_balance(account).await?;
        loan_eligibility(
            balance,
            self.config.loan_min_balance,
            self.config.loan_multiplier,
        )
    }

    /// Open accounts in store order
    pub async fn list_users(&self) -> BankResult<Vec<Account>> {
        Ok(self.db.account_repo().list().await?)
    }

    /// Closed accounts in archive order
    pub async fn list_deleted_users(&self) -> BankResult<Vec<ArchivedAccount>> {
        Ok(self.db.archive_repo().list().await?)
    }

    /// Every ledger row, newest first
    pub async fn list_transactions(&self) -> BankResult<Vec<TransactionRecord>> {
        Ok(self.db.transaction_repo().list_desc().await?)
    }

    /// Every complaint, newest first
    pub async fn list_complaints(&self) -> BankResult<Vec<Complaint>> {
        Ok(self.db.complaint_repo().list_desc().await?)
    }

    /// Write every ledger row to the report file, replacing any previous one
    pub async fn export_transactions_csv(&self) -> BankResult<PathBuf> {
        let rows = self.db.transaction_repo().list_raw().await?;

        fs::create_dir_all(&self.config.export_dir)?;
        let path = self.config.export_dir.join(REPORT_FILE_NAME);

        let mut writer = csv::Writer::from_path(&path).map_err(csv_failure)?;
        writer.write_record(REPORT_HEADER).map_err(csv_failure)?;
        for row in &rows {
            writer
                .write_record([
                    row.id.to_string(),
                    row.account_number.to_string(),
                    row.name.clone(),
                    row.transaction_type.clone(),
                    row.amount.clone(),
                    row.timestamp.clone(),
                ])
                .map_err(csv_failure)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = rows.len(), "Transaction report written");
        Ok(path)
    }

    /// Record feedback against an open account
    pub async fn submit_complaint(&self, account: AccountNumber, message: &str) -> BankResult<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(BankError::InvalidInput(
                "Complaint message must not be empty".to_string(),
            ));
        }

        let Some(name) = self.db.account_repo().name(account).await? else {
            warn!(%account, "Complaint from unknown account");
            return Err(not_found(account));
        };

        let mut tx = self.db.begin().await?;
        ComplaintRepo::append_tx(&mut *tx, account, &name, message, &ist_now()).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(%account, "Complaint submitted");
        Ok(())
    }
}

/// Loan rule: eligible at or above `min_balance`, up to `balance * multiplier`
pub fn loan_eligibility(
    balance: Decimal,
    min_balance: Decimal,
    multiplier: Decimal,
) -> BankResult<LoanEligibility> {
    if balance < min_balance {
        return Ok(LoanEligibility {
            eligible: false,
            max_loan_amount: Decimal::ZERO,
        });
    }

    let max_loan_amount = balance.checked_mul(multiplier).ok_or_else(|| {
        warn!(%balance, %multiplier, "Loan limit overflow");
        BankError::AmountOverflow
    })?;
    Ok(LoanEligibility {
        eligible: true,
        max_loan_amount,
    })
}

fn csv_failure(e: csv::Error) -> BankError {
    BankError::StorageFailure(format!("CSV export failed: {}", e))
}
