//! Table names and bootstrap data
//!
//! The tables themselves are created by `migrations/`.

/// Table names owned by the store
pub const TABLES: [&str; 5] = ["users", "deleted_users", "transactions", "complaints", "admins"];

/// Username of the admin seeded on first initialization
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

/// Password of the admin seeded on first initialization
pub const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin123";

/// Admin row inserted on first initialization
///
/// `credential` is stored as given; callers seal it through their credential
/// verifier before handing it over.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub credential: String,
}

impl BootstrapAdmin {
    pub fn new(username: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            credential: credential.into(),
        }
    }
}

impl Default for BootstrapAdmin {
    fn default() -> Self {
        Self::new(BOOTSTRAP_ADMIN_USERNAME, BOOTSTRAP_ADMIN_PASSWORD)
    }
}
