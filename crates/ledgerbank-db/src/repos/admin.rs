//! Admin credential repository

use sqlx::sqlite::SqliteConnection;
use sqlx::SqlitePool;

use crate::{DbAdmin, DbError, DbResult};

/// Repository for admin console credentials
pub struct AdminRepo {
    pool: SqlitePool,
}

impl AdminRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new admin; `DbError::Duplicate` if the username is taken
    pub async fn create(&self, username: &str, credential: &str) -> DbResult<()> {
        sqlx::query("INSERT INTO admins (username, password) VALUES (?1, ?2)")
            .bind(username)
            .bind(credential)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from_insert(e, || format!("Admin '{}'", username)))?;

        Ok(())
    }

    /// Insert unless the username exists; returns whether a row was written
    pub async fn insert_if_absent(
        conn: &mut SqliteConnection,
        username: &str,
        credential: &str,
    ) -> DbResult<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO admins (username, password) VALUES (?1, ?2)")
            .bind(username)
            .bind(credential)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Find an admin by username
    pub async fn find(&self, username: &str) -> DbResult<Option<DbAdmin>> {
        let admin = sqlx::query_as::<_, DbAdmin>(
            "SELECT username, password FROM admins WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Number of admins
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
