//! Database error types

use ledgerbank_types::BankError;
use thiserror::Error;

/// Database operation errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl DbError {
    /// Map a unique-constraint violation to `Duplicate`, anything else to `Query`
    pub(crate) fn from_insert(e: sqlx::Error, what: impl FnOnce() -> String) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DbError::Duplicate(what());
            }
        }
        DbError::Query(e)
    }
}

impl From<rust_decimal::Error> for DbError {
    fn from(e: rust_decimal::Error) -> Self {
        DbError::Decode(format!("decimal: {}", e))
    }
}

impl From<chrono::ParseError> for DbError {
    fn from(e: chrono::ParseError) -> Self {
        DbError::Decode(format!("timestamp: {}", e))
    }
}

impl From<DbError> for BankError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Duplicate(what) => BankError::AlreadyExists(what),
            DbError::NotFound(what) => BankError::NotFound(what),
            other => BankError::StorageFailure(other.to_string()),
        }
    }
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;
