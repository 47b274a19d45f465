//! Application configuration
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. The file passed with `--config`
//! 3. `config/default` and `config/local` (any format the `config` crate reads)
//! 4. `LEDGERBANK__<SECTION>__<KEY>` environment variables
//!
//! Command-line flags are applied on top by `main`.

use std::path::Path;

use anyhow::Context;
use ledgerbank_auth::AuthConfig;
use ledgerbank_db::DatabaseConfig;
use ledgerbank_ledger::LedgerConfig;
use serde::{Deserialize, Serialize};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub ledger: LedgerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERBANK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let app_config = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(app_config)
    }
}
