//! Customer dashboard

use ledgerbank_ledger::Bank;
use ledgerbank_types::{Account, AccountNumber, Pin};

use super::report;
use crate::{display, prompt};

const USER_MENU: [&str; 10] = [
    "Check Balance",
    "Deposit",
    "Withdraw",
    "Transfer",
    "My History",
    "Loan Eligibility",
    "Change PIN",
    "Close Account",
    "Feedback",
    "Logout",
];

const BACK: &str = "the dashboard";

pub(super) async fn dashboard(bank: &Bank, account: Account) -> anyhow::Result<()> {
    let number = account.account_number;

    loop {
        display::section(&format!("DASHBOARD: {}", account.name));

        match prompt::select("Select an action", &USER_MENU)? {
            0 => {
                if let Some(balance) = report(bank.reports.get_balance(number).await) {
                    display::labeled("Balance", &display::money(balance));
                }
            }
            1 => deposit(bank, number).await?,
            2 => withdraw(bank, number).await?,
            3 => transfer(bank, number).await?,
            4 => {
                if let Some(rows) = report(bank.reports.recent_history(number).await) {
                    display::history(&rows);
                }
            }
            5 => loan_eligibility(bank, number).await,
            6 => change_pin(bank, number).await?,
            7 => {
                if close_account(bank, number).await? {
                    return Ok(());
                }
            }
            8 => feedback(bank, number).await?,
            _ => {
                display::info("Logging out...");
                return Ok(());
            }
        }

        prompt::pause(BACK)?;
    }
}

async fn deposit(bank: &Bank, number: AccountNumber) -> anyhow::Result<()> {
    let raw = prompt::text("Amount to deposit")?;
    if raw.is_empty() {
        return Ok(());
    }
    let Some(amount) = report(prompt::parse_amount(&raw)) else {
        return Ok(());
    };

    if let Some(balance) = report(bank.ledger.deposit(number, amount).await) {
        display::success(&format!(
            "Deposited {}. New balance: {}",
            display::money(amount),
            display::money(balance)
        ));
    }
    Ok(())
}

async fn withdraw(bank: &Bank, number: AccountNumber) -> anyhow::Result<()> {
    let raw = prompt::text("Amount to withdraw")?;
    if raw.is_empty() {
        return Ok(());
    }
    let Some(amount) = report(prompt::parse_amount(&raw)) else {
        return Ok(());
    };

    if let Some(balance) = report(bank.ledger.withdraw(number, amount).await) {
        display::success(&format!(
            "Withdrew {}. New balance: {}",
            display::money(amount),
            display::money(balance)
        ));
    }
    Ok(())
}

async fn transfer(bank: &Bank, number: AccountNumber) -> anyhow::Result<()> {
    let raw = prompt::text("Receiver account number (Enter to cancel)")?;
    if raw.is_empty() {
        return Ok(());
    }
    let Some(receiver) = report(prompt::parse_account_number(&raw)) else {
        return Ok(());
    };

    let Some(lookup) = report(bank.reports.account_name(receiver).await) else {
        return Ok(());
    };
    let Some(receiver_name) = lookup else {
        display::error("Account not found.");
        return Ok(());
    };

    display::info(&format!("Transferring to: {}", receiver_name));
    if !prompt::confirm("Confirm receiver?")? {
        display::info("Cancelled.");
        return Ok(());
    }

    let Some(amount) = report(prompt::parse_amount(&prompt::text("Amount")?)) else {
        return Ok(());
    };

    if report(bank.ledger.transfer(number, receiver, amount).await).is_some() {
        display::success(&format!(
            "Transferred {} to {}.",
            display::money(amount),
            receiver_name
        ));
    }
    Ok(())
}

async fn loan_eligibility(bank: &Bank, number: AccountNumber) {
    let Some(result) = report(bank.reports.check_loan_eligibility(number).await) else {
        return;
    };

    if result.eligible {
        display::success(&format!(
            "Eligible for a loan of up to {}",
            display::money(result.max_loan_amount)
        ));
    } else {
        display::warning(&format!(
            "A minimum balance of {} is required.",
            display::money(bank.ledger.config().loan_min_balance)
        ));
    }
}

async fn change_pin(bank: &Bank, number: AccountNumber) -> anyhow::Result<()> {
    let Some(pin) = report(Pin::parse(&prompt::secret("New 4-digit PIN")?)) else {
        return Ok(());
    };

    if report(bank.ledger.update_pin(number, &pin).await).is_some() {
        display::success("PIN updated.");
    }
    Ok(())
}

/// Returns whether the account is gone and the session should end
async fn close_account(bank: &Bank, number: AccountNumber) -> anyhow::Result<bool> {
    if !prompt::confirm("Close this account permanently?")? {
        display::info("Cancelled.");
        return Ok(false);
    }

    if report(bank.ledger.close_account(number).await).is_some() {
        display::success("Account closed. Thank you for banking with us.");
        return Ok(true);
    }
    Ok(false)
}

async fn feedback(bank: &Bank, number: AccountNumber) -> anyhow::Result<()> {
    let message = prompt::text("Message")?;
    if message.is_empty() {
        return Ok(());
    }

    if report(bank.reports.submit_complaint(number, &message).await).is_some() {
        display::success("Feedback submitted. Thank you!");
    }
    Ok(())
}
