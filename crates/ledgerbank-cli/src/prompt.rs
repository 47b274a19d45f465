//! Terminal input
//!
//! Prompt helpers return `anyhow::Result` because a failing terminal ends the
//! session. The `parse_*` helpers return `BankResult` so bad input is shown to
//! the user and the menu carries on.

use std::str::FromStr;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use ledgerbank_types::{AccountNumber, BankError, BankResult};
use rust_decimal::Decimal;

/// Pick one entry from a menu; returns its index
pub fn select(title: &str, items: &[&str]) -> anyhow::Result<usize> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(title)
        .items(items)
        .default(0)
        .interact()?;
    Ok(choice)
}

/// Free text, trimmed; empty when the user just presses Enter
pub fn text(prompt: &str) -> anyhow::Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Hidden input for PINs and passwords
pub fn secret(prompt: &str) -> anyhow::Result<String> {
    let value = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;
    Ok(value.trim().to_string())
}

pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let yes = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(yes)
}

/// Wait for Enter
pub fn pause(destination: &str) -> anyhow::Result<()> {
    println!();
    text(&format!("Press Enter to return to {}", destination))?;
    Ok(())
}

/// Parse a money amount typed by the user
///
/// Sign checks are left to the ledger, which owns that rule.
pub fn parse_amount(raw: &str) -> BankResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|_| BankError::InvalidInput("Amount must be a number".to_string()))
}

pub fn parse_account_number(raw: &str) -> BankResult<AccountNumber> {
    AccountNumber::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("250").unwrap(), dec!(250));
        assert_eq!(parse_amount(" 99.95 ").unwrap(), dec!(99.95));
        assert_eq!(parse_amount("-5").unwrap(), dec!(-5));
        assert!(matches!(parse_amount("ten"), Err(BankError::InvalidInput(_))));
        assert!(matches!(parse_amount(""), Err(BankError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_account_number() {
        assert_eq!(parse_account_number("123456").unwrap(), AccountNumber(123456));
        assert!(matches!(
            parse_account_number("12ab56"),
            Err(BankError::InvalidInput(_))
        ));
    }
}
