//! Admin console

use ledgerbank_ledger::Bank;

use super::report;
use crate::{display, prompt};

const ADMIN_MENU: [&str; 8] = [
    "View Users",
    "View Transactions",
    "Apply Interest",
    "Download CSV",
    "View Complaints",
    "View Deleted Users",
    "Add New Admin",
    "Logout",
];

const BACK: &str = "the admin menu";

pub(super) async fn dashboard(bank: &Bank) -> anyhow::Result<()> {
    loop {
        display::section("ADMIN DASHBOARD");

        match prompt::select("Select an action", &ADMIN_MENU)? {
            0 => {
                if let Some(rows) = report(bank.reports.list_users().await) {
                    display::accounts(&rows);
                }
            }
            1 => {
                if let Some(rows) = report(bank.reports.list_transactions().await) {
                    display::transactions(&rows);
                }
            }
            2 => apply_interest(bank).await?,
            3 => {
                if let Some(path) = report(bank.reports.export_transactions_csv().await) {
                    display::success(&format!("Report written to {}", path.display()));
                }
            }
            4 => {
                if let Some(rows) = report(bank.reports.list_complaints().await) {
                    display::complaints(&rows);
                }
            }
            5 => {
                if let Some(rows) = report(bank.reports.list_deleted_users().await) {
                    display::archived(&rows);
                }
            }
            6 => add_admin(bank).await?,
            _ => {
                display::info("Logging out...");
                return Ok(());
            }
        }

        prompt::pause(BACK)?;
    }
}

async fn apply_interest(bank: &Bank) -> anyhow::Result<()> {
    let rate = bank.ledger.config().interest_rate;
    let percent = rate * rust_decimal::Decimal::ONE_HUNDRED;

    if !prompt::confirm(&format!("Apply {}% interest to ALL users?", percent.normalize()))? {
        display::info("Operation cancelled.");
        return Ok(());
    }

    if let Some(count) = report(bank.ledger.apply_interest_to_all(rate).await) {
        display::success(&format!("Interest applied to {} account(s).", count));
    }
    Ok(())
}

async fn add_admin(bank: &Bank) -> anyhow::Result<()> {
    display::section("ADD NEW ADMIN");

    let username = prompt::text("New admin username")?;
    if username.is_empty() {
        display::error("Username cannot be empty.");
        return Ok(());
    }

    let password = prompt::secret("New admin password")?;
    if password.is_empty() {
        display::error("Password cannot be empty.");
        return Ok(());
    }

    if report(bank.auth.add_admin(&username, &password).await).is_some() {
        display::success(&format!("Admin '{}' added.", username));
    }
    Ok(())
}
