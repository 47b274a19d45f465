//! LedgerBank Ledger - balance mutations and reporting
//!
//! - [`Ledger`]: deposits, withdrawals, transfers, the interest sweep,
//!   account closure and PIN changes
//! - [`Reports`]: balances, history, loan eligibility, admin listings,
//!   the CSV report and complaints
//! - [`Bank`]: the two above plus the [`AuthGate`], sharing one store
//!
//! # Invariants
//!
//! 1. No negative balances
//! 2. Every balance change appends exactly one ledger row per account touched
//! 3. Multi-row changes are atomic
//! 4. Closed accounts keep their number forever

pub mod config;
pub mod engine;
pub mod reporting;

pub use config::LedgerConfig;
pub use engine::Ledger;
pub use reporting::{loan_eligibility, LoanEligibility, Reports, REPORT_FILE_NAME, REPORT_HEADER};

use ledgerbank_auth::{AuthConfig, AuthGate};
use ledgerbank_db::Database;

/// Everything a front end needs, over one store
#[derive(Clone)]
pub struct Bank {
    pub auth: AuthGate,
    pub ledger: Ledger,
    pub reports: Reports,
    db: Database,
}

impl Bank {
    pub fn new(db: Database, auth_config: AuthConfig, ledger_config: LedgerConfig) -> Self {
        let auth = AuthGate::new(db.clone(), auth_config);
        let ledger = Ledger::new(db.clone(), auth.verifier(), ledger_config.clone());
        let reports = Reports::new(db.clone(), ledger_config);

        Self {
            auth,
            ledger,
            reports,
            db,
        }
    }

    /// Get the database reference
    pub fn db(&self) -> &Database {
        &self.db
    }
}
