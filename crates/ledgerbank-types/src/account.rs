//! Account identity and records

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BankError;

/// Six-digit account number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(pub i64);

impl AccountNumber {
    /// Smallest number handed out by account creation
    pub const MIN: i64 = 100_000;
    /// Largest number handed out by account creation
    pub const MAX: i64 = 999_999;

    /// Draw a random number from the six-digit space
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AccountNumber {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| BankError::InvalidInput("Account number must be numeric".to_string()))
    }
}

impl From<i64> for AccountNumber {
    fn from(n: i64) -> Self {
        Self(n)
    }
}

/// Four-digit numeric PIN
///
/// Kept as text so leading zeros survive.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin(String);

impl Pin {
    pub const LENGTH: usize = 4;

    /// Validate raw input as exactly four ASCII digits
    pub fn parse(raw: &str) -> Result<Self, BankError> {
        let raw = raw.trim();
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(BankError::InvalidInput(
                "PIN must contain numbers only".to_string(),
            ));
        }
        if raw.len() != Self::LENGTH {
            return Err(BankError::InvalidInput(
                "PIN must be exactly 4 digits".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl TryFrom<String> for Pin {
    type Error = BankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}

/// An open account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: AccountNumber,
    pub name: String,
    /// Stored credential; plaintext or a sealed hash depending on the verifier
    #[serde(skip_serializing)]
    pub pin: String,
    pub balance: Decimal,
}

/// Snapshot of a closed account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedAccount {
    pub account_number: AccountNumber,
    pub name: String,
    #[serde(skip_serializing)]
    pub pin: String,
    pub balance: Decimal,
    pub closed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_account_numbers_are_six_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let n = AccountNumber::random(&mut rng);
            assert!((AccountNumber::MIN..=AccountNumber::MAX).contains(&n.value()));
            assert_eq!(n.to_string().len(), 6);
        }
    }

    #[test]
    fn test_account_number_parsing() {
        assert_eq!(" 123456 ".parse::<AccountNumber>().unwrap(), AccountNumber(123456));
        assert!(matches!(
            "12ab".parse::<AccountNumber>(),
            Err(BankError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_pin_validation() {
        assert_eq!(Pin::parse("0420").unwrap().as_str(), "0420");
        assert!(Pin::parse("123").is_err());
        assert!(Pin::parse("12345").is_err());
        assert!(Pin::parse("12a4").is_err());
        assert!(Pin::parse("").is_err());
    }

    #[test]
    fn test_pin_debug_is_masked() {
        let pin = Pin::parse("9876").unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
    }

    #[test]
    fn test_pin_deserialize_validates() {
        let ok: Result<Pin, _> = serde_json::from_str("\"1234\"");
        assert!(ok.is_ok());
        let bad: Result<Pin, _> = serde_json::from_str("\"12\"");
        assert!(bad.is_err());
    }
}
