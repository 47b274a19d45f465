//! LedgerBank Types - Canonical domain types for the terminal bank ledger
//!
//! This crate has zero dependencies on other ledgerbank crates. It defines:
//!
//! - Identity types (`AccountNumber`, `Pin`)
//! - Account and archive records
//! - Transaction and complaint records
//! - IST timestamp helpers
//! - The shared error taxonomy (`BankError`)
//!
//! # Invariants
//!
//! 1. Balances are never negative
//! 2. Transaction and complaint records are append-only
//! 3. Names are copied into history rows at write time, so history stays
//!    readable after the account is archived

pub mod account;
pub mod error;
pub mod time;
pub mod transaction;

pub use account::*;
pub use error::*;
pub use time::*;
pub use transaction::*;
