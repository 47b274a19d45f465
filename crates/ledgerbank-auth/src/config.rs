//! Authentication configuration

use ledgerbank_db::schema::{BOOTSTRAP_ADMIN_PASSWORD, BOOTSTRAP_ADMIN_USERNAME};
use serde::{Deserialize, Serialize};

use crate::CredentialScheme;

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// How PINs and admin passwords are stored
    pub credential_scheme: CredentialScheme,
    /// Random draws allowed before account creation gives up
    pub max_account_number_attempts: u32,
    /// Admin seeded into an empty store
    pub bootstrap_admin_username: String,
    pub bootstrap_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credential_scheme: CredentialScheme::default(),
            max_account_number_attempts: 1_000,
            bootstrap_admin_username: BOOTSTRAP_ADMIN_USERNAME.to_string(),
            bootstrap_admin_password: BOOTSTRAP_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.credential_scheme, CredentialScheme::Plaintext);
        assert_eq!(config.max_account_number_attempts, 1_000);
        assert_eq!(config.bootstrap_admin_username, "admin");
        assert_eq!(config.bootstrap_admin_password, "admin123");
    }
}
