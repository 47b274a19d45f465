//! Account repository

use ledgerbank_types::{Account, AccountNumber};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteConnection;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::convert_all;
use crate::{DbAccount, DbError, DbResult};

/// Repository for open accounts (`users` table)
pub struct AccountRepo {
    pool: SqlitePool,
}

impl AccountRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account with a zero balance
    ///
    /// Returns `DbError::Duplicate` when the number is already open or has
    /// ever been archived, so callers can draw a fresh number and retry.
    pub async fn create(
        &self,
        account_number: AccountNumber,
        name: &str,
        pin_credential: &str,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (account_number, name, pin, balance)
            SELECT ?1, ?2, ?3, '0'
            WHERE NOT EXISTS (SELECT 1 FROM deleted_users WHERE account_number = ?1)
            "#,
        )
        .bind(account_number.value())
        .bind(name)
        .bind(pin_credential)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_insert(e, || format!("Account {}", account_number)))?;

        if result.rows_affected() == 0 {
            return Err(DbError::Duplicate(format!(
                "Account {} (archived)",
                account_number
            )));
        }

        Ok(())
    }

    /// Find an open account by number
    pub async fn find(&self, account_number: AccountNumber) -> DbResult<Option<Account>> {
        fetch_account(&self.pool, account_number).await
    }

    /// Find an open account inside an atomic unit
    pub async fn find_tx(
        conn: &mut SqliteConnection,
        account_number: AccountNumber,
    ) -> DbResult<Option<Account>> {
        fetch_account(conn, account_number).await
    }

    /// Current balance, if the account exists
    pub async fn balance(&self, account_number: AccountNumber) -> DbResult<Option<Decimal>> {
        Ok(self.find(account_number).await?.map(|a| a.balance))
    }

    /// Holder name, if the account exists
    pub async fn name(&self, account_number: AccountNumber) -> DbResult<Option<String>> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM users WHERE account_number = ?1",
        )
        .bind(account_number.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }

    /// All open accounts in store order
    pub async fn list(&self) -> DbResult<Vec<Account>> {
        fetch_all_accounts(&self.pool).await
    }

    /// All open accounts, read inside an atomic unit
    pub async fn list_tx(conn: &mut SqliteConnection) -> DbResult<Vec<Account>> {
        fetch_all_accounts(conn).await
    }

    /// Overwrite the balance of one account
    pub async fn set_balance_tx(
        conn: &mut SqliteConnection,
        account_number: AccountNumber,
        balance: Decimal,
    ) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET balance = ?2 WHERE account_number = ?1")
            .bind(account_number.value())
            .bind(balance.to_string())
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Account {}", account_number)));
        }

        Ok(())
    }

    /// Overwrite the stored PIN credential
    pub async fn set_pin(
        &self,
        account_number: AccountNumber,
        pin_credential: &str,
    ) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET pin = ?2 WHERE account_number = ?1")
            .bind(account_number.value())
            .bind(pin_credential)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Account {}", account_number)));
        }

        Ok(())
    }

    /// Remove an account from the active table
    pub async fn delete_tx(
        conn: &mut SqliteConnection,
        account_number: AccountNumber,
    ) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE account_number = ?1")
            .bind(account_number.value())
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Account {}", account_number)));
        }

        Ok(())
    }

    /// Number of open accounts
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn fetch_account<'e, E>(executor: E, account_number: AccountNumber) -> DbResult<Option<Account>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, DbAccount>(
        "SELECT account_number, name, pin, balance FROM users WHERE account_number = ?1",
    )
    .bind(account_number.value())
    .fetch_optional(executor)
    .await?;

    row.map(Account::try_from).transpose()
}

async fn fetch_all_accounts<'e, E>(executor: E) -> DbResult<Vec<Account>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, DbAccount>(
        "SELECT account_number, name, pin, balance FROM users ORDER BY account_number",
    )
    .fetch_all(executor)
    .await?;

    convert_all(rows)
}
