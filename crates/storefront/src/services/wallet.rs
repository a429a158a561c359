//! Wallet ledger service.
//!
//! Deposits and purchase debits are the only two balance mutations.
//! Every mutation validates first, then writes the balance and appends
//! exactly one ledger entry. There is no rollback between the two
//! writes: once the balance lands, the operation is committed.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use penny_black_core::{Money, UserId};

use crate::error::Result;
use crate::models::wallet::{Transaction, WalletAccount};
use crate::storage::{KeyValueStore, keys};

/// Smallest accepted deposit, in rupees.
pub const MIN_DEPOSIT_RUPEES: i64 = 1;
/// Largest accepted deposit, in rupees.
pub const MAX_DEPOSIT_RUPEES: i64 = 50_000;

/// Errors from wallet operations.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    /// The deposit amount is outside the accepted range.
    #[error("deposit must be between {min} and {max}")]
    InvalidDepositAmount {
        /// Lower bound (inclusive).
        min: Money,
        /// Upper bound (inclusive).
        max: Money,
    },

    /// The balance cannot cover the debit.
    #[error("insufficient balance: have {balance}, need {required}")]
    InsufficientBalance {
        /// Balance before the attempted debit.
        balance: Money,
        /// Amount the debit needed.
        required: Money,
    },
}

/// Per-user balance plus append-only transaction ledger.
pub struct WalletService<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> WalletService<'a> {
    /// Create a wallet service over a store.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The user's account; absent storage means a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored account cannot be read.
    pub fn account(&self, user: UserId) -> Result<WalletAccount> {
        Ok(self.store.get(&keys::wallet(user))?.unwrap_or_default())
    }

    /// The user's ledger, oldest entry first.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored ledger cannot be read.
    pub fn transactions(&self, user: UserId) -> Result<Vec<Transaction>> {
        Ok(self.store.get(&keys::transactions(user))?.unwrap_or_default())
    }

    /// Add money to the deposit account.
    ///
    /// The amount must be between [`MIN_DEPOSIT_RUPEES`] and
    /// [`MAX_DEPOSIT_RUPEES`] inclusive. On success the balance grows by
    /// exactly the amount and one completed deposit entry is appended.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidDepositAmount`] for out-of-range
    /// amounts; nothing is persisted in that case.
    pub fn deposit(&self, user: UserId, amount: Money) -> Result<(WalletAccount, Transaction)> {
        let min = Money::rupees(MIN_DEPOSIT_RUPEES);
        let max = Money::rupees(MAX_DEPOSIT_RUPEES);
        let in_range = amount.currency == min.currency
            && amount.amount >= Decimal::from(MIN_DEPOSIT_RUPEES)
            && amount.amount <= Decimal::from(MAX_DEPOSIT_RUPEES);
        if !in_range {
            return Err(WalletError::InvalidDepositAmount { min, max }.into());
        }

        let mut account = self.account(user)?;
        account.balance = account.balance.checked_add(amount)?;

        let txn = Transaction::deposit(amount, "Deposit to wallet".to_owned(), Utc::now());
        self.persist(user, &account, txn.clone())?;

        info!(user = %user, amount = %amount, balance = %account.balance, "wallet deposit");
        Ok((account, txn))
    }

    /// Debit the account for a purchase.
    ///
    /// On success the balance shrinks by exactly the amount and one
    /// completed purchase entry (negative amount) is appended.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InsufficientBalance`] when the balance
    /// cannot cover the amount; nothing is persisted in that case.
    pub fn debit(
        &self,
        user: UserId,
        amount: Money,
        description: String,
    ) -> Result<(WalletAccount, Transaction)> {
        let mut account = self.account(user)?;
        let next = account.balance.checked_sub(amount)?;
        if next.is_negative() {
            return Err(WalletError::InsufficientBalance {
                balance: account.balance,
                required: amount,
            }
            .into());
        }
        account.balance = next;

        let txn = Transaction::purchase(amount, description, Utc::now());
        self.persist(user, &account, txn.clone())?;

        info!(user = %user, amount = %amount, balance = %account.balance, "wallet debit");
        Ok((account, txn))
    }

    /// Write the balance, then append the ledger entry. Both writes are
    /// treated as committed once made.
    fn persist(&self, user: UserId, account: &WalletAccount, txn: Transaction) -> Result<()> {
        self.store.put(&keys::wallet(user), account)?;
        let mut ledger = self.transactions(user)?;
        ledger.push(txn);
        self.store.put(&keys::transactions(user), &ledger)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::MemoryStore;
    use penny_black_core::TransactionKind;

    const USER: UserId = UserId::new(1);

    #[test]
    fn test_deposit_grows_balance_and_appends_one_entry() {
        let store = MemoryStore::new();
        let wallet = WalletService::new(&store);

        let (account, txn) = wallet.deposit(USER, Money::rupees(500)).unwrap();
        assert_eq!(account.balance, Money::rupees(500));
        assert_eq!(txn.kind, TransactionKind::Deposit);
        assert_eq!(txn.amount, Money::rupees(500));

        let ledger = wallet.transactions(USER).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.first().unwrap().amount, Money::rupees(500));
    }

    #[test]
    fn test_deposit_bounds_are_inclusive() {
        let store = MemoryStore::new();
        let wallet = WalletService::new(&store);

        assert!(wallet.deposit(USER, Money::rupees(1)).is_ok());
        assert!(wallet.deposit(USER, Money::rupees(50_000)).is_ok());

        for bad in [0, -5, 50_001] {
            let err = wallet.deposit(USER, Money::rupees(bad)).unwrap_err();
            assert!(
                matches!(
                    err,
                    AppError::Wallet(WalletError::InvalidDepositAmount { .. })
                ),
                "amount {bad}"
            );
        }
    }

    #[test]
    fn test_rejected_deposit_persists_nothing() {
        let store = MemoryStore::new();
        let wallet = WalletService::new(&store);

        let _ = wallet.deposit(USER, Money::rupees(0));
        assert_eq!(wallet.account(USER).unwrap().balance, Money::rupees(0));
        assert!(wallet.transactions(USER).unwrap().is_empty());
        assert_eq!(store.read(&keys::wallet(USER)).unwrap(), None);
    }

    #[test]
    fn test_debit_shrinks_balance_and_appends_negative_entry() {
        let store = MemoryStore::new();
        let wallet = WalletService::new(&store);
        wallet.deposit(USER, Money::rupees(1_000)).unwrap();

        let (account, txn) = wallet
            .debit(USER, Money::rupees(250), "Order ORD-1".to_owned())
            .unwrap();
        assert_eq!(account.balance, Money::rupees(750));
        assert_eq!(txn.kind, TransactionKind::Purchase);
        assert_eq!(txn.amount, Money::rupees(-250));

        let ledger = wallet.transactions(USER).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_debit_beyond_balance_rejects_and_persists_nothing() {
        let store = MemoryStore::new();
        let wallet = WalletService::new(&store);
        wallet.deposit(USER, Money::rupees(100)).unwrap();

        let err = wallet
            .debit(USER, Money::rupees(250), "Order ORD-1".to_owned())
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Wallet(WalletError::InsufficientBalance { .. })
        ));

        assert_eq!(wallet.account(USER).unwrap().balance, Money::rupees(100));
        assert_eq!(wallet.transactions(USER).unwrap().len(), 1);
    }

    #[test]
    fn test_exact_balance_debit_empties_the_wallet() {
        let store = MemoryStore::new();
        let wallet = WalletService::new(&store);
        wallet.deposit(USER, Money::rupees(250)).unwrap();

        let (account, _) = wallet
            .debit(USER, Money::rupees(250), "Order ORD-2".to_owned())
            .unwrap();
        assert_eq!(account.balance, Money::rupees(0));
    }

    #[test]
    fn test_wallets_are_namespaced_per_user() {
        let store = MemoryStore::new();
        let wallet = WalletService::new(&store);

        wallet.deposit(UserId::new(1), Money::rupees(100)).unwrap();
        wallet.deposit(UserId::new(2), Money::rupees(900)).unwrap();

        assert_eq!(
            wallet.account(UserId::new(1)).unwrap().balance,
            Money::rupees(100)
        );
        assert_eq!(
            wallet.account(UserId::new(2)).unwrap().balance,
            Money::rupees(900)
        );
    }
}
