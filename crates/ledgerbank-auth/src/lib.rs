//! LedgerBank Authentication Layer
//!
//! - **Account creation**: random six-digit numbers, redrawn on collision
//! - **Customer login**: account number + 4-digit PIN
//! - **Admin login**: username + password, with a bootstrap admin seeded
//!   into every fresh store
//! - **Credential storage**: pluggable [`CredentialVerifier`] (plaintext or
//!   Argon2id)
//!
//! A failed login is `Ok(None)` / `Ok(false)`, never an error. Errors are
//! reserved for store failures and malformed input.

pub mod config;
pub mod credential;
pub mod gate;

pub use config::AuthConfig;
pub use credential::{
    verifier_for, Argon2Verifier, CredentialScheme, CredentialVerifier, PlaintextVerifier,
};
pub use gate::AuthGate;
