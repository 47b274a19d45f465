//! Closed-account archive repository

use chrono::NaiveDateTime;
use ledgerbank_types::{format_timestamp, Account, AccountNumber, ArchivedAccount};
use sqlx::sqlite::SqliteConnection;
use sqlx::SqlitePool;

use crate::models::convert_all;
use crate::{DbArchivedAccount, DbResult};

/// Repository for the `deleted_users` archive
///
/// Rows are written once and never updated.
pub struct ArchiveRepo {
    pool: SqlitePool,
}

impl ArchiveRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Snapshot an account into the archive
    pub async fn insert_tx(
        conn: &mut SqliteConnection,
        account: &Account,
        closed_at: &NaiveDateTime,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO deleted_users (account_number, name, pin, balance, closed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(account.account_number.value())
        .bind(&account.name)
        .bind(&account.pin)
        .bind(account.balance.to_string())
        .bind(format_timestamp(closed_at))
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All archived accounts in the order they were closed
    pub async fn list(&self) -> DbResult<Vec<ArchivedAccount>> {
        let rows = sqlx::query_as::<_, DbArchivedAccount>(
            r#"
            SELECT id, account_number, name, pin, balance, closed_at
            FROM deleted_users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    /// Most recent archive entry for an account number
    pub async fn find_latest(&self, account_number: AccountNumber) -> DbResult<Option<ArchivedAccount>> {
        let row = sqlx::query_as::<_, DbArchivedAccount>(
            r#"
            SELECT id, account_number, name, pin, balance, closed_at
            FROM deleted_users
            WHERE account_number = ?1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(account_number.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ArchivedAccount::try_from).transpose()
    }
}
