//! Interactive menus

mod admin;
mod user;

use ledgerbank_ledger::Bank;
use ledgerbank_types::{BankResult, Pin};

use crate::{display, prompt};

const MAIN_MENU: [&str; 4] = ["User Login", "Create New Account", "Admin Login", "Exit"];

/// Run the main menu until the user exits
pub async fn run(bank: &Bank) -> anyhow::Result<()> {
    display::banner();

    loop {
        display::section("MAIN MENU");
        match prompt::select("Choose an option", &MAIN_MENU)? {
            0 => user_login(bank).await?,
            1 => create_account(bank).await?,
            2 => admin_login(bank).await?,
            _ => {
                display::info("Quitting the program...");
                return Ok(());
            }
        }
    }
}

/// Show a failed operation and carry on
pub(crate) fn report<T>(result: BankResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if !e.is_rejection() {
                tracing::error!(error = %e, "Operation failed");
            }
            display::error(&e.to_string());
            None
        }
    }
}

async fn user_login(bank: &Bank) -> anyhow::Result<()> {
    display::section("USER LOGIN");

    let raw = prompt::text("Account number")?;
    if raw.is_empty() {
        return Ok(());
    }
    let Some(number) = report(prompt::parse_account_number(&raw)) else {
        return Ok(());
    };

    let raw_pin = prompt::secret("PIN")?;
    if raw_pin.is_empty() {
        return Ok(());
    }
    let Some(pin) = report(Pin::parse(&raw_pin)) else {
        return Ok(());
    };

    match report(bank.auth.login(number, &pin).await) {
        Some(Some(account)) => user::dashboard(bank, account).await,
        Some(None) => {
            display::error("Invalid credentials. Access denied.");
            Ok(())
        }
        None => Ok(()),
    }
}

async fn create_account(bank: &Bank) -> anyhow::Result<()> {
    display::section("CREATE NEW ACCOUNT");

    loop {
        let name = prompt::text("Full name (Enter to cancel)")?;
        if name.is_empty() {
            display::info("Registration cancelled.");
            return Ok(());
        }

        let Some(pin) = report(Pin::parse(&prompt::secret("Set a 4-digit PIN")?)) else {
            continue;
        };

        if let Some(number) = report(bank.auth.create_account(&name, &pin).await) {
            display::success("Account created!");
            display::labeled("Your account number", &number.to_string());
            display::warning("Write this number down, you need it to log in.");
            return prompt::pause("the main menu");
        }
    }
}

async fn admin_login(bank: &Bank) -> anyhow::Result<()> {
    display::section("ADMIN LOGIN");

    let username = prompt::text("Admin username")?;
    let password = prompt::secret("Admin password")?;

    match report(bank.auth.admin_login(&username, &password).await) {
        Some(true) => {
            display::success("Admin verified.");
            admin::dashboard(bank).await
        }
        Some(false) => {
            display::error("Invalid admin credentials.");
            Ok(())
        }
        None => Ok(()),
    }
}
