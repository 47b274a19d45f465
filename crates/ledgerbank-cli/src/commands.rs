//! One-shot subcommands

use colored::*;
use ledgerbank_ledger::Bank;
use rust_decimal::Decimal;

use crate::config::AppConfig;
use crate::display;

/// Report the state of a freshly initialized store
pub async fn init(bank: &Bank, app_config: &AppConfig) -> anyhow::Result<()> {
    let db = bank.db();
    let tables = db.schema().await?;

    println!("{}", "Store ready".bright_white().bold());
    println!("{}", "─".repeat(40));
    display::labeled("Database", &app_config.database.url);
    display::labeled("Objects", &tables.len().to_string());
    display::labeled("Accounts", &db.account_repo().count().await?.to_string());
    display::labeled("Admins", &db.admin_repo().count().await?.to_string());
    display::labeled(
        "Credential scheme",
        &format!("{:?}", app_config.auth.credential_scheme).to_lowercase(),
    );

    Ok(())
}

/// Write the CSV report
pub async fn export(bank: &Bank) -> anyhow::Result<()> {
    let path = bank.reports.export_transactions_csv().await?;
    display::success(&format!("Report written to {}", path.display()));
    Ok(())
}

/// Run the interest sweep
pub async fn interest(bank: &Bank, rate: Option<Decimal>) -> anyhow::Result<()> {
    let rate = rate.unwrap_or(bank.ledger.config().interest_rate);
    let count = bank.ledger.apply_interest_to_all(rate).await?;
    display::success(&format!(
        "Interest at {} applied to {} account(s).",
        rate, count
    ));
    Ok(())
}
