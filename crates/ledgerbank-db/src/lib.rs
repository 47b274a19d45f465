//! LedgerBank Database Layer
//!
//! Embedded SQLite persistence for the bank ledger.
//!
//! # Tables
//!
//! - **users**: open accounts
//! - **deleted_users**: archive of closed accounts (append-only)
//! - **transactions**: balance movements (append-only)
//! - **complaints**: customer feedback (append-only)
//! - **admins**: admin console credentials
//!
//! # Repository Pattern
//!
//! Each table has its own repository. Read methods run against the pool.
//! Methods that take a `&mut SqliteConnection` are meant to run inside a
//! transaction opened with [`Database::begin`]; dropping that transaction
//! without committing rolls every statement back.

pub mod config;
pub mod error;
pub mod models;
pub mod repos;
pub mod schema;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

pub use config::DatabaseConfig;
pub use error::{DbError, DbResult};
pub use models::*;
pub use repos::*;
pub use schema::BootstrapAdmin;

/// A transaction scoped to one atomic unit
pub type DbTx<'a> = Transaction<'a, Sqlite>;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database described by `config`
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!(url = %config.url, "Opening SQLite database");

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DbError::Connection(format!("{}: {}", config.url, e)))?
            .create_if_missing(config.create_if_missing);

        // Each connection to `:memory:` is its own database, so pin the pool to one
        let max_connections = if config.is_in_memory() {
            1
        } else {
            config.max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?;

        info!("Connected to SQLite");

        Ok(Self { pool })
    }

    /// Open a private in-memory database
    pub async fn in_memory() -> DbResult<Self> {
        Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        })
        .await
    }

    /// Run database migrations
    pub async fn migrate(&self) -> DbResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
        info!("Migrations complete");
        Ok(())
    }

    /// Migrate and seed the bootstrap admin
    ///
    /// Safe to run on every startup.
    pub async fn init(&self, bootstrap: &BootstrapAdmin) -> DbResult<()> {
        self.migrate().await?;

        let mut tx = self.begin().await?;
        let seeded = AdminRepo::insert_if_absent(&mut *tx, &bootstrap.username, &bootstrap.credential)
            .await?;
        if seeded {
            info!(username = %bootstrap.username, "Seeded bootstrap admin");
        } else {
            debug!(username = %bootstrap.username, "Bootstrap admin already present");
        }

        tx.commit().await?;
        info!("Schema ready");
        Ok(())
    }

    /// Start an atomic unit
    pub async fn begin(&self) -> DbResult<DbTx<'static>> {
        Ok(self.pool.begin().await?)
    }

    /// Table names and their `CREATE` statements, sorted by name
    pub async fn schema(&self) -> DbResult<Vec<(String, String)>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT name, sql FROM sqlite_master
            WHERE type IN ('table', 'index') AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Health check
    pub async fn health_check(&self) -> DbResult<HealthStatus> {
        let reachable = sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok();

        let mut missing_tables = Vec::new();
        if reachable {
            let present: Vec<String> = self.schema().await?.into_iter().map(|(name, _)| name).collect();
            for table in schema::TABLES {
                if !present.iter().any(|name| name == table) {
                    missing_tables.push(table.to_string());
                }
            }
        }

        Ok(HealthStatus {
            reachable,
            healthy: reachable && missing_tables.is_empty(),
            missing_tables,
        })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create repository instances
    pub fn account_repo(&self) -> AccountRepo {
        AccountRepo::new(self.pool.clone())
    }

    pub fn archive_repo(&self) -> ArchiveRepo {
        ArchiveRepo::new(self.pool.clone())
    }

    pub fn transaction_repo(&self) -> TransactionRepo {
        TransactionRepo::new(self.pool.clone())
    }

    pub fn complaint_repo(&self) -> ComplaintRepo {
        ComplaintRepo::new(self.pool.clone())
    }

    pub fn admin_repo(&self) -> AdminRepo {
        AdminRepo::new(self.pool.clone())
    }
}

/// Health status of the store
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub reachable: bool,
    pub missing_tables: Vec<String>,
    pub healthy: bool,
}
