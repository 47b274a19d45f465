//! Complaint repository

use chrono::NaiveDateTime;
use ledgerbank_types::{format_timestamp, AccountNumber, Complaint};
use sqlx::sqlite::SqliteConnection;
use sqlx::SqlitePool;

use crate::models::convert_all;
use crate::{DbComplaint, DbResult};

/// Repository for the append-only `complaints` table
pub struct ComplaintRepo {
    pool: SqlitePool,
}

impl ComplaintRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a complaint inside an atomic unit, returning its id
    pub async fn append_tx(
        conn: &mut SqliteConnection,
        account_number: AccountNumber,
        name: &str,
        message: &str,
        timestamp: &NaiveDateTime,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO complaints (account_number, name, message, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(account_number.value())
        .bind(name)
        .bind(message)
        .bind(format_timestamp(timestamp))
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Every complaint, newest first
    pub async fn list_desc(&self) -> DbResult<Vec<Complaint>> {
        let rows = sqlx::query_as::<_, DbComplaint>(
            r#"
            SELECT id, account_number, name, message, timestamp
            FROM complaints
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }
}
