//! Transaction ledger repository

use chrono::NaiveDateTime;
use ledgerbank_types::{format_timestamp, AccountNumber, TransactionKind, TransactionRecord};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteConnection;
use sqlx::SqlitePool;

use crate::models::convert_all;
use crate::{DbResult, DbTransaction};

/// Repository for the append-only `transactions` table
pub struct TransactionRepo {
    pool: SqlitePool,
}

impl TransactionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a ledger row inside an atomic unit, returning its id
    pub async fn append_tx(
        conn: &mut SqliteConnection,
        account_number: AccountNumber,
        name: &str,
        kind: TransactionKind,
        amount: Decimal,
        timestamp: &NaiveDateTime,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (account_number, name, transaction_type, amount, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(account_number.value())
        .bind(name)
        .bind(kind.as_str())
        .bind(amount.to_string())
        .bind(format_timestamp(timestamp))
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Latest `limit` rows for one account, newest first
    pub async fn history(
        &self,
        account_number: AccountNumber,
        limit: u32,
    ) -> DbResult<Vec<TransactionRecord>> {
        let rows = sqlx::query_as::<_, DbTransaction>(
            r#"
            SELECT id, account_number, name, transaction_type, amount, timestamp
            FROM transactions
            WHERE account_number = ?1
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )
        .bind(account_number.value())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    /// Every row, newest first
    pub async fn list_desc(&self) -> DbResult<Vec<TransactionRecord>> {
        let rows = sqlx::query_as::<_, DbTransaction>(
            r#"
            SELECT id, account_number, name, transaction_type, amount, timestamp
            FROM transactions
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    /// Every row in store order, as raw text columns
    ///
    /// Used by the CSV export, which writes values exactly as stored.
    pub async fn list_raw(&self) -> DbResult<Vec<DbTransaction>> {
        let rows = sqlx::query_as::<_, DbTransaction>(
            r#"
            SELECT id, account_number, name, transaction_type, amount, timestamp
            FROM transactions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Number of rows recorded for one account
    pub async fn count_for(&self, account_number: AccountNumber) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transactions WHERE account_number = ?1",
        )
        .bind(account_number.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Number of rows of one kind across all accounts
    pub async fn count_kind(&self, kind: TransactionKind) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transactions WHERE transaction_type = ?1",
        )
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
