//! Display utilities for the CLI

use colored::*;
use ledgerbank_types::{
    format_timestamp, Account, ArchivedAccount, Complaint, TransactionRecord,
};
use rust_decimal::Decimal;

/// Print the start-up banner
pub fn banner() {
    println!();
    println!("{}", "═".repeat(60).bright_black());
    println!("  {}", "LEDGERBANK".bright_white().bold());
    println!("  {}", "Accounts, transfers, loans and interest".bright_black());
    println!("{}", "═".repeat(60).bright_black());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a labeled value
pub fn labeled(label: &str, value: &str) {
    println!("  {}: {}", label.bright_white(), value.bright_cyan());
}

/// Rupee amount with two decimals
pub fn money(amount: Decimal) -> String {
    format!("₹ {:.2}", amount)
}

fn empty(message: &str) {
    println!("  {}", message.bright_black());
}

fn header(columns: &str) {
    println!("  {}", columns.bright_white().bold());
    println!("  {}", "─".repeat(columns.chars().count()).bright_black());
}

/// Cut `text` to `width` characters, marking the cut
pub fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Mini statement for one account
pub fn history(rows: &[TransactionRecord]) {
    if rows.is_empty() {
        empty("No transactions found.");
        return;
    }

    header(&format!("{:<18} {:>14}  {:<19}", "Type", "Amount", "Time (IST)"));
    for row in rows {
        let amount = if row.kind.is_credit() {
            money(row.amount).bright_green()
        } else {
            money(row.amount).bright_red()
        };
        println!(
            "  {:<18} {:>14}  {:<19}",
            row.kind.as_str(),
            amount,
            format_timestamp(&row.timestamp)
        );
    }
}

/// Every ledger row, for the admin console
pub fn transactions(rows: &[TransactionRecord]) {
    if rows.is_empty() {
        empty("No transactions recorded yet.");
        return;
    }

    header(&format!(
        "{:>6}  {:<8} {:<20} {:<18} {:>14}  {:<19}",
        "ID", "Acc Num", "Name", "Type", "Amount", "Time (IST)"
    ));
    for row in rows {
        println!(
            "  {:>6}  {:<8} {:<20} {:<18} {:>14}  {:<19}",
            row.id,
            row.account_number,
            clip(&row.name, 20),
            row.kind.as_str(),
            money(row.amount),
            format_timestamp(&row.timestamp)
        );
    }
}

/// Open accounts
pub fn accounts(rows: &[Account]) {
    if rows.is_empty() {
        empty("No active users.");
        return;
    }

    header(&format!("{:<8} {:<24} {:>16}", "Acc Num", "Name", "Balance"));
    for row in rows {
        println!(
            "  {:<8} {:<24} {:>16}",
            row.account_number,
            clip(&row.name, 24),
            money(row.balance)
        );
    }
}

/// Closed accounts
pub fn archived(rows: &[ArchivedAccount]) {
    if rows.is_empty() {
        empty("No deleted user records found.");
        return;
    }

    header(&format!("{:<8} {:<24} {:<19}", "Acc Num", "Name", "Closed At (IST)"));
    for row in rows {
        println!(
            "  {:<8} {:<24} {:<19}",
            row.account_number,
            clip(&row.name, 24),
            format_timestamp(&row.closed_at)
        );
    }
}

/// Customer complaints
pub fn complaints(rows: &[Complaint]) {
    if rows.is_empty() {
        empty("No complaints found.");
        return;
    }

    header(&format!(
        "{:>5}  {:<8} {:<20} {:<19}  {}",
        "ID", "Acc Num", "Name", "Time (IST)", "Message"
    ));
    for row in rows {
        println!(
            "  {:>5}  {:<8} {:<20} {:<19}  {}",
            row.id,
            row.account_number,
            clip(&row.name, 20),
            format_timestamp(&row.timestamp),
            row.message
        );
    }
}
