//! Wallet domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use penny_black_core::{Currency, Money, TransactionId, TransactionKind, TransactionStatus};

/// A user's deposit account.
///
/// The balance only moves through the wallet service's deposit and debit
/// paths, both of which append a ledger entry in the same operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// Current balance; never negative.
    pub balance: Money,
}

impl WalletAccount {
    /// A fresh account with a zero balance.
    #[must_use]
    pub const fn new(currency: Currency) -> Self {
        Self {
            balance: Money::zero(currency),
        }
    }
}

impl Default for WalletAccount {
    fn default() -> Self {
        Self::new(Currency::INR)
    }
}

/// One ledger entry. Entries are append-only: once written they are
/// never edited, so the ledger replays to the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Ledger entry id.
    pub id: TransactionId,
    /// Deposit or purchase.
    pub kind: TransactionKind,
    /// Signed amount: positive for deposits, negative for purchases.
    pub amount: Money,
    /// Human-readable line for statements.
    pub description: String,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
    /// Settlement status.
    pub status: TransactionStatus,
}

impl Transaction {
    /// Build a completed deposit entry.
    #[must_use]
    pub fn deposit(amount: Money, description: String, at: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            kind: TransactionKind::Deposit,
            amount,
            description,
            timestamp: at,
            status: TransactionStatus::Completed,
        }
    }

    /// Build a completed purchase entry; `amount` is the positive charge
    /// and is stored negated.
    #[must_use]
    pub fn purchase(amount: Money, description: String, at: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            kind: TransactionKind::Purchase,
            amount: -amount,
            description,
            timestamp: at,
            status: TransactionStatus::Completed,
        }
    }
}
