//! Database models - mapped from SQLite tables
//!
//! Money and timestamps are stored as TEXT; conversion into the domain types
//! in `ledgerbank-types` happens here and nowhere else.

use std::str::FromStr;

use ledgerbank_types::{
    parse_timestamp, Account, AccountNumber, ArchivedAccount, Complaint, TransactionKind,
    TransactionRecord,
};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::{DbError, DbResult};

fn decimal(raw: &str) -> DbResult<Decimal> {
    Ok(Decimal::from_str(raw)?)
}

// ============================================================================
// Account Models
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct DbAccount {
    pub account_number: i64,
    pub name: String,
    pub pin: String,
    pub balance: String,
}

impl TryFrom<DbAccount> for Account {
    type Error = DbError;

    fn try_from(row: DbAccount) -> DbResult<Self> {
        Ok(Account {
            account_number: AccountNumber(row.account_number),
            balance: decimal(&row.balance)?,
            name: row.name,
            pin: row.pin,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbArchivedAccount {
    pub id: i64,
    pub account_number: i64,
    pub name: String,
    pub pin: String,
    pub balance: String,
    pub closed_at: String,
}

impl TryFrom<DbArchivedAccount> for ArchivedAccount {
    type Error = DbError;

    fn try_from(row: DbArchivedAccount) -> DbResult<Self> {
        Ok(ArchivedAccount {
            account_number: AccountNumber(row.account_number),
            balance: decimal(&row.balance)?,
            closed_at: parse_timestamp(&row.closed_at)?,
            name: row.name,
            pin: row.pin,
        })
    }
}

// ============================================================================
// Ledger Models
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct DbTransaction {
    pub id: i64,
    pub account_number: i64,
    pub name: String,
    pub transaction_type: String,
    pub amount: String,
    pub timestamp: String,
}

impl TryFrom<DbTransaction> for TransactionRecord {
    type Error = DbError;

    fn try_from(row: DbTransaction) -> DbResult<Self> {
        let kind = TransactionKind::from_str(&row.transaction_type)
            .map_err(|e| DbError::Decode(e.to_string()))?;
        Ok(TransactionRecord {
            id: row.id,
            account_number: AccountNumber(row.account_number),
            kind,
            amount: decimal(&row.amount)?,
            timestamp: parse_timestamp(&row.timestamp)?,
            name: row.name,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbComplaint {
    pub id: i64,
    pub account_number: i64,
    pub name: String,
    pub message: String,
    pub timestamp: String,
}

impl TryFrom<DbComplaint> for Complaint {
    type Error = DbError;

    fn try_from(row: DbComplaint) -> DbResult<Self> {
        Ok(Complaint {
            id: row.id,
            account_number: AccountNumber(row.account_number),
            timestamp: parse_timestamp(&row.timestamp)?,
            name: row.name,
            message: row.message,
        })
    }
}

// ============================================================================
// Admin Models
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct DbAdmin {
    pub username: String,
    pub password: String,
}

/// Convert a batch of rows, failing on the first undecodable one
pub(crate) fn convert_all<R, T>(rows: Vec<R>) -> DbResult<Vec<T>>
where
    T: TryFrom<R, Error = DbError>,
{
    rows.into_iter().map(T::try_from).collect()
}
