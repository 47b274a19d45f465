//! Account creation and login

use std::sync::Arc;

use ledgerbank_db::{BootstrapAdmin, Database, DbError};
use ledgerbank_types::{Account, AccountNumber, BankError, BankResult, Pin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{verifier_for, AuthConfig, CredentialVerifier};

/// Front door for customers and admins
#[derive(Clone)]
pub struct AuthGate {
    db: Database,
    verifier: Arc<dyn CredentialVerifier>,
    config: AuthConfig,
}

impl AuthGate {
    /// Build a gate using the verifier named in `config`
    pub fn new(db: Database, config: AuthConfig) -> Self {
        let verifier = verifier_for(config.credential_scheme);
        Self::with_verifier(db, verifier, config)
    }

    pub fn with_verifier(
        db: Database,
        verifier: Arc<dyn CredentialVerifier>,
        config: AuthConfig,
    ) -> Self {
        Self {
            db,
            verifier,
            config,
        }
    }

    /// Shared verifier, for components that also write credentials
    pub fn verifier(&self) -> Arc<dyn CredentialVerifier> {
        self.verifier.clone()
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Bootstrap admin with its password already sealed
    pub fn bootstrap_admin(&self) -> BankResult<BootstrapAdmin> {
        let credential = self.verifier.seal(&self.config.bootstrap_admin_password)?;
        Ok(BootstrapAdmin::new(
            self.config.bootstrap_admin_username.clone(),
            credential,
        ))
    }

    /// Create missing tables and seed the bootstrap admin
    pub async fn initialize_store(&self) -> BankResult<()> {
        let bootstrap = self.bootstrap_admin()?;
        self.db.init(&bootstrap).await?;
        Ok(())
    }

    /// Open a new account with a zero balance and a fresh random number
    pub async fn create_account(&self, name: &str, pin: &Pin) -> BankResult<AccountNumber> {
        let mut rng = StdRng::from_entropy();
        self.create_account_with(name, pin, &mut rng).await
    }

    /// Same as [`create_account`](Self::create_account), drawing numbers from `rng`
    pub async fn create_account_with<R: Rng + Send>(
        &self,
        name: &str,
        pin: &Pin,
        rng: &mut R,
    ) -> BankResult<AccountNumber> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BankError::InvalidInput("Name must not be empty".to_string()));
        }

        let credential = self.verifier.seal(pin.as_str())?;
        let repo = self.db.account_repo();

        for attempt in 1..=self.config.max_account_number_attempts {
            let number = AccountNumber::random(rng);

            match repo.create(number, name, &credential).await {
                Ok(()) => {
                    info!(account = %number, "Account created");
                    return Ok(number);
                }
                Err(DbError::Duplicate(what)) => {
                    debug!(attempt, %what, "Account number taken, drawing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            attempts = self.config.max_account_number_attempts,
            "No free account number found"
        );
        Err(BankError::StorageFailure(format!(
            "No free account number after {} attempts",
            self.config.max_account_number_attempts
        )))
    }

    /// Check a customer's PIN; `None` when the number is unknown or the PIN is wrong
    pub async fn login(&self, number: AccountNumber, pin: &Pin) -> BankResult<Option<Account>> {
        let Some(account) = self.db.account_repo().find(number).await? else {
            debug!(account = %number, "Login for unknown account");
            return Ok(None);
        };

        if self.verifier.verify(pin.as_str(), &account.pin)? {
            info!(account = %number, "Customer logged in");
            Ok(Some(account))
        } else {
            warn!(account = %number, "Wrong PIN");
            Ok(None)
        }
    }

    /// Check admin credentials
    pub async fn admin_login(&self, username: &str, password: &str) -> BankResult<bool> {
        let Some(admin) = self.db.admin_repo().find(username).await? else {
            warn!(%username, "Admin login for unknown user");
            return Ok(false);
        };

        let ok = self.verifier.verify(password, &admin.password)?;
        if ok {
            info!(%username, "Admin logged in");
        } else {
            warn!(%username, "Wrong admin password");
        }
        Ok(ok)
    }

    /// Register another admin
    pub async fn add_admin(&self, username: &str, password: &str) -> BankResult<()> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(BankError::InvalidInput(
                "Username and password must not be empty".to_string(),
            ));
        }

        let credential = self.verifier.seal(password)?;
        self.db.admin_repo().create(username, &credential).await?;
        info!(%username, "Admin added");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argon2Verifier, CredentialScheme};

    async fn gate_with(config: AuthConfig) -> AuthGate {
        let db = Database::in_memory().await.unwrap();
        let gate = AuthGate::new(db, config);
        gate.initialize_store().await.unwrap();
        gate
    }

    async fn gate() -> AuthGate {
        gate_with(AuthConfig::default()).await
    }

    fn pin(s: &str) -> Pin {
        Pin::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_account_starts_at_zero() {
        let gate = gate().await;
        let number = gate.create_account("Asha", &pin("1234")).await.unwrap();

        assert!((AccountNumber::MIN..=AccountNumber::MAX).contains(&number.value()));

        let account = gate.login(number, &pin("1234")).await.unwrap().unwrap();
        assert_eq!(account.name, "Asha");
        assert!(account.balance.is_zero());
    }

    #[tokio::test]
    async fn test_create_account_rejects_blank_name() {
        let gate = gate().await;
        let result = gate.create_account("   ", &pin("1234")).await;
        assert!(matches!(result, Err(BankError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_account_redraws_on_collision() {
        let gate = gate().await;

        let taken = AccountNumber::random(&mut StdRng::seed_from_u64(7));
        gate.db
            .account_repo()
            .create(taken, "Existing", "0000")
            .await
            .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let number = gate
            .create_account_with("Newcomer", &pin("1111"), &mut rng)
            .await
            .unwrap();

        assert_ne!(number, taken);
        assert_eq!(gate.db.account_repo().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_account_gives_up_after_max_attempts() {
        let config = AuthConfig {
            max_account_number_attempts: 1,
            ..Default::default()
        };
        let gate = gate_with(config).await;

        let taken = AccountNumber::random(&mut StdRng::seed_from_u64(11));
        gate.db
            .account_repo()
            .create(taken, "Existing", "0000")
            .await
            .unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let result = gate
            .create_account_with("Newcomer", &pin("1111"), &mut rng)
            .await;
        assert!(matches!(result, Err(BankError::StorageFailure(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_pin_and_unknown_number() {
        let gate = gate().await;
        let number = gate.create_account("Asha", &pin("1234")).await.unwrap();

        assert!(gate.login(number, &pin("4321")).await.unwrap().is_none());

        let unknown = if number.value() == AccountNumber::MIN {
            AccountNumber(AccountNumber::MAX)
        } else {
            AccountNumber(AccountNumber::MIN)
        };
        assert!(gate.login(unknown, &pin("1234")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_admin_login() {
        let gate = gate().await;
        assert!(gate.admin_login("admin", "admin123").await.unwrap());
        assert!(!gate.admin_login("admin", "wrong").await.unwrap());
        assert!(!gate.admin_login("nobody", "admin123").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_admin_duplicate() {
        let gate = gate().await;
        gate.add_admin("auditor", "s3cret").await.unwrap();
        assert!(gate.admin_login("auditor", "s3cret").await.unwrap());

        let result = gate.add_admin("auditor", "other").await;
        assert!(matches!(result, Err(BankError::AlreadyExists(_))));

        let result = gate.add_admin("", "pw").await;
        assert!(matches!(result, Err(BankError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_argon2_scheme_end_to_end() {
        let config = AuthConfig {
            credential_scheme: CredentialScheme::Argon2,
            ..Default::default()
        };
        let gate = gate_with(config).await;
        assert_eq!(gate.verifier().scheme(), CredentialScheme::Argon2);

        let number = gate.create_account("Vikram", &pin("9876")).await.unwrap();
        let stored = gate.db.account_repo().find(number).await.unwrap().unwrap();
        assert_ne!(stored.pin, "9876");

        assert!(gate.login(number, &pin("9876")).await.unwrap().is_some());
        assert!(gate.admin_login("admin", "admin123").await.unwrap());
    }

    #[tokio::test]
    async fn test_with_custom_verifier() {
        let db = Database::in_memory().await.unwrap();
        let gate = AuthGate::with_verifier(
            db,
            Arc::new(Argon2Verifier::default()),
            AuthConfig::default(),
        );
        gate.initialize_store().await.unwrap();
        assert!(gate.admin_login("admin", "admin123").await.unwrap());
    }
}
