//! Balance mutations
//!
//! Every operation that touches more than one row runs inside a single
//! [`DbTx`](ledgerbank_db::DbTx). Returning early with `?` drops the
//! transaction, which rolls back every statement issued so far.
//!
//! Reads made before a transaction is opened go through the pool. Once a
//! transaction is open, all reads go through it: an in-memory store has a
//! single connection and the transaction is holding it.

use std::sync::Arc;

use ledgerbank_auth::CredentialVerifier;
use ledgerbank_db::{AccountRepo, ArchiveRepo, Database, DbError, TransactionRepo};
use ledgerbank_types::{
    ist_now, Account, AccountNumber, BankError, BankResult, Pin, TransactionKind,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::LedgerConfig;

/// Ledger engine
#[derive(Clone)]
pub struct Ledger {
    db: Database,
    verifier: Arc<dyn CredentialVerifier>,
    config: LedgerConfig,
}

impl Ledger {
    pub fn new(db: Database, verifier: Arc<dyn CredentialVerifier>, config: LedgerConfig) -> Self {
        Self {
            db,
            verifier,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Credit `amount` and record a DEPOSIT; returns the new balance
    pub async fn deposit(&self, account: AccountNumber, amount: Decimal) -> BankResult<Decimal> {
        ensure_positive(amount)?;

        let mut tx = self.db.begin().await?;
        let holder = AccountRepo::find_tx(&mut *tx, account)
            .await?
            .ok_or_else(|| not_found(account))?;

        let new_balance = credit(account, holder.balance, amount)?;
        AccountRepo::set_balance_tx(&mut *tx, account, new_balance).await?;
        TransactionRepo::append_tx(
            &mut *tx,
            account,
            &holder.name,
            TransactionKind::Deposit,
            amount,
            &ist_now(),
        )
        .await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(%account, %amount, %new_balance, "Deposit");
        Ok(new_balance)
    }

    /// Debit `amount` and record a WITHDRAWAL; returns the new balance
    pub async fn withdraw(&self, account: AccountNumber, amount: Decimal) -> BankResult<Decimal> {
        ensure_positive(amount)?;

        let available = self
            .db
            .account_repo()
            .balance(account)
            .await?
            .ok_or_else(|| not_found(account))?;
        ensure_covers(account, available, amount)?;

        let mut tx = self.db.begin().await?;
        let holder = AccountRepo::find_tx(&mut *tx, account)
            .await?
            .ok_or_else(|| not_found(account))?;
        let new_balance = debit(account, holder.balance, amount)?;
        AccountRepo::set_balance_tx(&mut *tx, account, new_balance).await?;
        TransactionRepo::append_tx(
            &mut *tx,
            account,
            &holder.name,
            TransactionKind::Withdrawal,
            amount,
            &ist_now(),
        )
        .await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(%account, %amount, %new_balance, "Withdrawal");
        Ok(new_balance)
    }

    /// Move `amount` from `sender` to `receiver`
    ///
    /// The debit, the credit and both ledger rows commit together. If the
    /// receiver turns out not to exist, the sender's debit is rolled back.
    pub async fn transfer(
        &self,
        sender: AccountNumber,
        receiver: AccountNumber,
        amount: Decimal,
    ) -> BankResult<()> {
        ensure_positive(amount)?;
        if sender == receiver {
            warn!(account = %sender, "Transfer to self rejected");
            return Err(BankError::SelfTransfer);
        }

        let available = self
            .db
            .account_repo()
            .balance(sender)
            .await?
            .ok_or_else(|| not_found(sender))?;
        ensure_covers(sender, available, amount)?;

        let timestamp = ist_now();
        let mut tx = self.db.begin().await?;

        let from = AccountRepo::find_tx(&mut *tx, sender)
            .await?
            .ok_or_else(|| not_found(sender))?;
        let sender_balance = debit(sender, from.balance, amount)?;

        AccountRepo::set_balance_tx(&mut *tx, sender, sender_balance).await?;
        TransactionRepo::append_tx(
            &mut *tx,
            sender,
            &from.name,
            TransactionKind::TransferSent,
            amount,
            &timestamp,
        )
        .await?;

        let Some(to) = AccountRepo::find_tx(&mut *tx, receiver).await? else {
            warn!(%sender, %receiver, "Transfer receiver not found, rolling back");
            return Err(BankError::ReceiverNotFound);
        };

        let receiver_balance = credit(receiver, to.balance, amount)?;
        AccountRepo::set_balance_tx(&mut *tx, receiver, receiver_balance).await?;
        TransactionRepo::append_tx(
            &mut *tx,
            receiver,
            &to.name,
            TransactionKind::TransferReceived,
            amount,
            &timestamp,
        )
        .await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(%sender, %receiver, %amount, "Transfer");
        Ok(())
    }

    /// Credit interest at the configured rate
    pub async fn apply_interest(&self) -> BankResult<usize> {
        self.apply_interest_to_all(self.config.interest_rate).await
    }

    /// Credit `balance * rate` to every account holding money
    ///
    /// Returns the number of accounts credited. Accounts at zero are skipped
    /// and get no ledger row. The whole sweep is one atomic unit.
    pub async fn apply_interest_to_all(&self, rate: Decimal) -> BankResult<usize> {
        if rate <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }

        let timestamp = ist_now();
        let mut tx = self.db.begin().await?;
        let accounts = AccountRepo::list_tx(&mut *tx).await?;

        let mut credited = 0;
        for Account {
            account_number,
            name,
            balance,
            ..
        } in accounts
        {
            if balance <= Decimal::ZERO {
                continue;
            }

            let interest = balance.checked_mul(rate).ok_or_else(|| {
                warn!(account = %account_number, %balance, %rate, "Interest overflow, sweep aborted");
                BankError::AmountOverflow
            })?;
            let new_balance = credit(account_number, balance, interest)?;
            AccountRepo::set_balance_tx(&mut *tx, account_number, new_balance).await?;
            TransactionRepo::append_tx(
                &mut *tx,
                account_number,
                &name,
                TransactionKind::InterestCredit,
                interest,
                &timestamp,
            )
            .await?;
            debug!(account = %account_number, %interest, "Interest credited");
            credited += 1;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(%rate, credited, "Interest sweep complete");
        Ok(credited)
    }

    /// Archive an empty account and remove it from the active table
    pub async fn close_account(&self, account: AccountNumber) -> BankResult<()> {
        let mut tx = self.db.begin().await?;
        let holder = AccountRepo::find_tx(&mut *tx, account)
            .await?
            .ok_or_else(|| not_found(account))?;

        if !holder.balance.is_zero() {
            warn!(%account, balance = %holder.balance, "Close rejected, balance remaining");
            return Err(BankError::NonZeroBalance {
                balance: holder.balance,
            });
        }

        ArchiveRepo::insert_tx(&mut *tx, &holder, &ist_now()).await?;
        AccountRepo::delete_tx(&mut *tx, account).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(%account, "Account closed");
        Ok(())
    }

    /// Replace the PIN of an account
    pub async fn update_pin(&self, account: AccountNumber, new_pin: &Pin) -> BankResult<()> {
        let credential = self.verifier.seal(new_pin.as_str())?;
        self.db.account_repo().set_pin(account, &credential).await?;

        info!(%account, "PIN updated");
        Ok(())
    }
}

fn ensure_positive(amount: Decimal) -> BankResult<()> {
    if amount <= Decimal::ZERO {
        warn!(%amount, "Non-positive amount rejected");
        return Err(BankError::InvalidAmount);
    }
    Ok(())
}

fn ensure_covers(account: AccountNumber, available: Decimal, requested: Decimal) -> BankResult<()> {
    if requested > available {
        warn!(%account, %available, %requested, "Insufficient funds");
        return Err(BankError::InsufficientFunds {
            available,
            requested,
        });
    }
    Ok(())
}

/// Balance after adding `amount`
fn credit(account: AccountNumber, balance: Decimal, amount: Decimal) -> BankResult<Decimal> {
    balance.checked_add(amount).ok_or_else(|| {
        warn!(%account, %balance, %amount, "Balance overflow");
        BankError::AmountOverflow
    })
}

/// Balance after taking `amount` out, re-checked inside the unit
///
/// The pool pre-check already logged any shortfall, so this one stays quiet.
fn debit(account: AccountNumber, balance: Decimal, amount: Decimal) -> BankResult<Decimal> {
    if amount > balance {
        debug!(%account, "Balance changed before debit");
        return Err(BankError::InsufficientFunds {
            available: balance,
            requested: amount,
        });
    }
    balance
        .checked_sub(amount)
        .ok_or(BankError::AmountOverflow)
}

pub(crate) fn not_found(account: AccountNumber) -> BankError {
    BankError::NotFound(format!("Account {}", account))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerbank_auth::PlaintextVerifier;
    use ledgerbank_db::BootstrapAdmin;
    use rust_decimal_macros::dec;

    async fn ledger() -> Ledger {
        let db = Database::in_memory().await.unwrap();
        db.init(&BootstrapAdmin::default()).await.unwrap();
        Ledger::new(db, Arc::new(PlaintextVerifier), LedgerConfig::default())
    }

    async fn open(ledger: &Ledger, number: i64, name: &str) -> AccountNumber {
        let number = AccountNumber(number);
        ledger
            .db
            .account_repo()
            .create(number, name, "1234")
            .await
            .unwrap();
        number
    }

    #[tokio::test]
    async fn test_non_positive_amounts_rejected() {
        let ledger = ledger().await;
        let a = open(&ledger, 100001, "Asha").await;

        assert_eq!(ledger.deposit(a, dec!(0)).await, Err(BankError::InvalidAmount));
        assert_eq!(ledger.deposit(a, dec!(-5)).await, Err(BankError::InvalidAmount));
        assert_eq!(ledger.withdraw(a, dec!(0)).await, Err(BankError::InvalidAmount));
        assert_eq!(
            ledger.transfer(a, AccountNumber(100002), dec!(-1)).await,
            Err(BankError::InvalidAmount)
        );
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let ledger = ledger().await;
        let missing = AccountNumber(555555);

        assert!(matches!(
            ledger.deposit(missing, dec!(10)).await,
            Err(BankError::NotFound(_))
        ));
        assert!(matches!(
            ledger.withdraw(missing, dec!(10)).await,
            Err(BankError::NotFound(_))
        ));
        assert!(matches!(
            ledger.close_account(missing).await,
            Err(BankError::NotFound(_))
        ));
        assert!(matches!(
            ledger.update_pin(missing, &Pin::parse("0000").unwrap()).await,
            Err(BankError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_withdraw_more_than_balance() {
        let ledger = ledger().await;
        let a = open(&ledger, 100001, "Asha").await;
        ledger.deposit(a, dec!(100)).await.unwrap();

        assert_eq!(
            ledger.withdraw(a, dec!(100.01)).await,
            Err(BankError::InsufficientFunds {
                available: dec!(100),
                requested: dec!(100.01),
            })
        );
        assert_eq!(ledger.withdraw(a, dec!(100)).await.unwrap(), dec!(0));
    }

    #[test]
    fn test_credit_and_debit_are_checked() {
        let a = AccountNumber(100001);

        assert_eq!(credit(a, dec!(10), dec!(2.5)), Ok(dec!(12.5)));
        assert_eq!(credit(a, Decimal::MAX, dec!(1)), Err(BankError::AmountOverflow));

        assert_eq!(debit(a, dec!(10), dec!(10)), Ok(dec!(0)));
        assert_eq!(
            debit(a, dec!(10), dec!(10.01)),
            Err(BankError::InsufficientFunds {
                available: dec!(10),
                requested: dec!(10.01),
            })
        );
    }

    #[tokio::test]
    async fn test_deposit_overflow_leaves_balance() {
        let ledger = ledger().await;
        let a = open(&ledger, 100001, "Asha").await;
        ledger.deposit(a, Decimal::MAX).await.unwrap();

        assert_eq!(ledger.deposit(a, dec!(1)).await, Err(BankError::AmountOverflow));

        let stored = ledger.db.account_repo().find(a).await.unwrap().unwrap();
        assert_eq!(stored.balance, Decimal::MAX);
        assert_eq!(ledger.db.transaction_repo().count_for(a).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_transfer_overflow_rolls_back_debit() {
        let ledger = ledger().await;
        let a = open(&ledger, 100001, "Asha").await;
        let b = open(&ledger, 100002, "Bala").await;
        ledger.deposit(a, dec!(100)).await.unwrap();
        ledger.deposit(b, Decimal::MAX).await.unwrap();

        assert_eq!(
            ledger.transfer(a, b, dec!(50)).await,
            Err(BankError::AmountOverflow)
        );

        let repo = ledger.db.account_repo();
        assert_eq!(repo.balance(a).await.unwrap(), Some(dec!(100)));
        assert_eq!(repo.balance(b).await.unwrap(), Some(Decimal::MAX));
        assert_eq!(
            ledger
                .db
                .transaction_repo()
                .count_kind(TransactionKind::TransferSent)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_interest_overflow_aborts_whole_sweep() {
        let ledger = ledger().await;
        // Swept in account-number order, so the small account is credited first
        let small = open(&ledger, 100001, "Asha").await;
        let huge = open(&ledger, 100002, "Bala").await;
        ledger.deposit(small, dec!(1000)).await.unwrap();
        ledger.deposit(huge, Decimal::MAX).await.unwrap();

        assert_eq!(
            ledger.apply_interest_to_all(dec!(0.05)).await,
            Err(BankError::AmountOverflow)
        );

        let repo = ledger.db.account_repo();
        assert_eq!(repo.balance(small).await.unwrap(), Some(dec!(1000)));
        assert_eq!(repo.balance(huge).await.unwrap(), Some(Decimal::MAX));
        assert_eq!(
            ledger
                .db
                .transaction_repo()
                .count_kind(TransactionKind::InterestCredit)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_self_transfer_rejected() {
        let ledger = ledger().await;
        let a = open(&ledger, 100001, "Asha").await;
        ledger.deposit(a, dec!(100)).await.unwrap();

        assert_eq!(ledger.transfer(a, a, dec!(10)).await, Err(BankError::SelfTransfer));
    }

    #[tokio::test]
    async fn test_interest_rate_must_be_positive() {
        let ledger = ledger().await;
        assert_eq!(
            ledger.apply_interest_to_all(dec!(0)).await,
            Err(BankError::InvalidAmount)
        );
    }

    #[tokio::test]
    async fn test_update_pin() {
        let ledger = ledger().await;
        let a = open(&ledger, 100001, "Asha").await;

        ledger.update_pin(a, &Pin::parse("0042").unwrap()).await.unwrap();

        let stored = ledger.db.account_repo().find(a).await.unwrap().unwrap();
        assert_eq!(stored.pin, "0042");
    }
}
