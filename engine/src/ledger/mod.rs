//! Ledger client interface
//!
//! The monitor never moves value itself; it queries balances and requests
//! transfers through this capability interface. The ledger is an external
//! collaborator: a transfer may fail, and failure is reported as a flag
//! rather than an abort, so a batch of top-ups can continue past an
//! individual failure.
//!
//! # Critical Invariants
//!
//! - `try_transfer` never panics; failure is a `false` return
//! - A failed transfer changes no balances
//! - All money values are i64 (minor units)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Capability interface to the external value-transfer system.
///
/// Tests substitute implementations that simulate success and failure
/// paths deterministically.
pub trait LedgerClient {
    /// Current balance of an account (0 for unknown accounts)
    fn balance_of(&self, account: &str) -> i64;

    /// Attempt to move `amount` from `from` to `to`.
    ///
    /// Returns true on success. Returns false (with no balance change) on
    /// insufficient funds, unknown accounts, or a non-positive amount.
    fn try_transfer(&mut self, from: &str, to: &str, amount: i64) -> bool;
}

/// In-memory ledger: a plain account → balance map.
///
/// Backs deterministic tests and self-contained embeddings. Transfers
/// fail safely rather than overdrawing.
///
/// # Example
/// ```
/// use funding_monitor_core_rs::{InMemoryLedger, LedgerClient};
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.open_account("treasury", 1_000_00);
/// ledger.open_account("alice", 0);
///
/// assert!(ledger.try_transfer("treasury", "alice", 400_00));
/// assert_eq!(ledger.balance_of("treasury"), 600_00);
/// assert_eq!(ledger.balance_of("alice"), 400_00);
///
/// // Insufficient funds: reported, not aborted
/// assert!(!ledger.try_transfer("treasury", "alice", 700_00));
/// assert_eq!(ledger.balance_of("treasury"), 600_00);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    balances: HashMap<String, i64>,
}

impl InMemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or reset) an account with the given balance
    pub fn open_account(&mut self, account: &str, balance: i64) {
        assert!(balance >= 0, "opening balance must be non-negative");
        self.balances.insert(account.to_string(), balance);
    }

    /// Credit an account directly (external inflow)
    pub fn deposit(&mut self, account: &str, amount: i64) {
        assert!(amount >= 0, "amount must be non-negative");
        *self.balances.entry(account.to_string()).or_insert(0) += amount;
    }

    /// Check if an account exists
    pub fn has_account(&self, account: &str) -> bool {
        self.balances.contains_key(account)
    }
}

impl LedgerClient for InMemoryLedger {
    fn balance_of(&self, account: &str) -> i64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn try_transfer(&mut self, from: &str, to: &str, amount: i64) -> bool {
        if amount <= 0 {
            return false;
        }
        if !self.balances.contains_key(from) || !self.balances.contains_key(to) {
            return false;
        }
        let from_balance = self.balances[from];
        if from_balance < amount {
            return false;
        }

        // Debit and credit together, or neither
        *self.balances.get_mut(from).unwrap() -= amount;
        *self.balances.get_mut(to).unwrap() += amount;
        true
    }
}
