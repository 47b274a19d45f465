//! LedgerBank CLI - Terminal bank ledger
//!
//! Runs the interactive menu by default. A few admin jobs are also available
//! as one-shot subcommands for scripting.
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu against ./bank.db
//! ledgerbank
//!
//! # Use another database and write reports elsewhere
//! ledgerbank --database-url sqlite:///var/lib/ledgerbank/bank.db --export-dir /tmp
//!
//! # One-shot jobs
//! ledgerbank init
//! ledgerbank export
//! ledgerbank interest --rate 0.04
//!
//! # Environment overrides
//! LEDGERBANK__AUTH__CREDENTIAL_SCHEME=argon2 ledgerbank
//! ```

mod commands;
mod config;
mod display;
mod menu;
mod prompt;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ledgerbank_db::Database;
use ledgerbank_ledger::Bank;

use crate::config::{AppConfig, LoggingConfig};

/// LedgerBank - accounts, transfers and reports in your terminal
#[derive(Parser, Debug)]
#[command(name = "ledgerbank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, global = true, env = "LEDGERBANK_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite connection URL
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LEDGERBANK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, global = true, env = "LEDGERBANK_LOG_FORMAT")]
    log_format: Option<String>,

    /// Directory the CSV report is written to
    #[arg(long, global = true, env = "LEDGERBANK_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the schema and the bootstrap admin, then exit
    Init,

    /// Write the transaction report to the export directory
    Export,

    /// Credit interest to every account holding money
    Interest {
        /// Rate to apply instead of the configured one (0.05 = 5%)
        #[arg(long)]
        rate: Option<Decimal>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut app_config = AppConfig::load(cli.config.as_deref())?;

    // Override with CLI arguments
    if let Some(url) = cli.database_url {
        app_config.database.url = url;
    }
    if let Some(level) = cli.log_level {
        app_config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        app_config.logging.format = format;
    }
    if let Some(dir) = cli.export_dir {
        app_config.ledger.export_dir = dir;
    }

    init_logging(&app_config.logging);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting LedgerBank");

    let db = Database::connect(&app_config.database)
        .await
        .with_context(|| format!("Failed to open database at {}", app_config.database.url))?;

    let bank = Bank::new(db.clone(), app_config.auth.clone(), app_config.ledger.clone());
    bank.auth
        .initialize_store()
        .await
        .context("Failed to initialize schema")?;

    let health = db.health_check().await?;
    if !health.healthy {
        anyhow::bail!(
            "Database is not usable (reachable: {}, missing tables: {:?})",
            health.reachable,
            health.missing_tables
        );
    }

    let result = match cli.command {
        None => menu::run(&bank).await,
        Some(Commands::Init) => commands::init(&bank, &app_config).await,
        Some(Commands::Export) => commands::export(&bank).await,
        Some(Commands::Interest { rate }) => commands::interest(&bank, rate).await,
    };

    db.close().await;
    tracing::info!("Shutdown complete");

    result
}

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with the menu on stdout.
fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true).with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_interest_rate() {
        let cli = Cli::try_parse_from(["ledgerbank", "interest", "--rate", "0.04"]).unwrap();
        match cli.command {
            Some(Commands::Interest { rate }) => assert_eq!(rate, Some(Decimal::new(4, 2))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["ledgerbank", "--export-dir", "/tmp/out"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.export_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_rejects_bad_rate() {
        assert!(Cli::try_parse_from(["ledgerbank", "interest", "--rate", "five"]).is_err());
    }
}
