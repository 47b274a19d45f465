//! Credential verification
//!
//! PINs and admin passwords go through a [`CredentialVerifier`] on the way
//! into the store (`seal`) and on the way back out (`verify`).
//!
//! - [`PlaintextVerifier`] stores the secret as given and compares it exactly.
//!   This is the default and keeps databases written by earlier releases
//!   readable. It offers no protection if the database file leaks.
//! - [`Argon2Verifier`] stores an Argon2id PHC string.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use ledgerbank_types::{BankError, BankResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage scheme for credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialScheme {
    #[default]
    Plaintext,
    Argon2,
}

/// Seals secrets for storage and checks candidates against stored values
pub trait CredentialVerifier: Send + Sync {
    /// Scheme implemented by this verifier
    fn scheme(&self) -> CredentialScheme;

    /// Produce the value to store for `secret`
    fn seal(&self, secret: &str) -> BankResult<String>;

    /// Check `candidate` against a stored value
    fn verify(&self, candidate: &str, stored: &str) -> BankResult<bool>;
}

/// Build the verifier for a configured scheme
pub fn verifier_for(scheme: CredentialScheme) -> Arc<dyn CredentialVerifier> {
    match scheme {
        CredentialScheme::Plaintext => Arc::new(PlaintextVerifier),
        CredentialScheme::Argon2 => Arc::new(Argon2Verifier::default()),
    }
}

/// Exact string comparison against the stored secret
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Plaintext
    }

    fn seal(&self, secret: &str) -> BankResult<String> {
        Ok(secret.to_string())
    }

    fn verify(&self, candidate: &str, stored: &str) -> BankResult<bool> {
        Ok(candidate == stored)
    }
}

/// Argon2id hash-and-compare
#[derive(Clone, Default)]
pub struct Argon2Verifier {
    argon2: Argon2<'static>,
}

impl CredentialVerifier for Argon2Verifier {
    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Argon2
    }

    fn seal(&self, secret: &str) -> BankResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| BankError::StorageFailure(format!("Credential hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    fn verify(&self, candidate: &str, stored: &str) -> BankResult<bool> {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Stored credential is not an Argon2 hash; rejecting");
                return Ok(false);
            }
        };

        match self.argon2.verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(BankError::StorageFailure(format!(
                "Credential verification failed: {}",
                e
            ))),
        }
    }
}
