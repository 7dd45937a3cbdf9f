//! Watchlist store
//!
//! Holds the ordered set of monitored recipient addresses plus their
//! per-address funding records. The store is a map-plus-index pair:
//! an arena of [`RecipientRecord`]s keyed by address, and a separate
//! ordered address sequence that defines selection priority.
//!
//! # Critical Invariants
//!
//! - Every address in the ordered index has an active record
//! - No duplicate addresses in the index
//! - No empty addresses; no zero top-up amounts while active
//! - Replacement is atomic: a failed call leaves prior state untouched
//!
//! Insertion order is significant: the selector consumes the shared
//! funding budget greedily in index order, so earlier addresses have
//! priority claim on the budget.

use crate::models::recipient::RecipientRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when replacing the watchlist
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatchlistError {
    /// Input arrays have mismatched lengths, or an entry carries an empty
    /// address or a zero top-up amount
    #[error("invalid watch list: arrays must have equal length, addresses must be non-empty, top-up amounts must be positive")]
    InvalidWatchList,

    /// The same address appears more than once in the new list
    #[error("duplicate address in watch list: {address}")]
    DuplicateAddress { address: String },
}

/// Ordered set of monitored recipients with per-address funding records.
///
/// # Example
/// ```
/// use funding_monitor_core_rs::Watchlist;
///
/// let mut wl = Watchlist::new();
/// wl.replace(
///     &["alice".to_string(), "bob".to_string()],
///     &[100_00, 200_00],
///     &[50_00, 150_00],
/// )
/// .unwrap();
///
/// assert_eq!(wl.addresses(), ["alice", "bob"]);
/// assert!(wl.record("alice").unwrap().active);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Watchlist {
    /// Arena of records keyed by address. Dropped addresses keep their
    /// record with `active = false` until re-registered.
    records: HashMap<String, RecipientRecord>,

    /// Ordered address index. Defines selection priority and iteration
    /// order for budget consumption.
    order: Vec<String>,
}

impl Watchlist {
    /// Create an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the watchlist wholesale.
    ///
    /// All three slices must have equal length. Every currently-watched
    /// address is deactivated first, then each new entry is validated and
    /// activated in order; an address appearing twice in the new list is
    /// caught by the in-loop activation. Every new entry's record is reset
    /// with `last_top_up_time = 0`, which clears cooldown history on every
    /// re-registration, including of an address that was already present
    /// and funded.
    ///
    /// The new map and index are built on the side and swapped in only on
    /// success, so a failed call leaves prior state untouched.
    ///
    /// No events are emitted by this operation; callers that need an audit
    /// trail must read the record getters.
    ///
    /// # Errors
    ///
    /// - [`WatchlistError::InvalidWatchList`] on length mismatch, empty
    ///   address, or zero top-up amount
    /// - [`WatchlistError::DuplicateAddress`] if an address repeats within
    ///   the new list
    pub fn replace(
        &mut self,
        addresses: &[String],
        min_balances: &[i64],
        top_up_amounts: &[i64],
    ) -> Result<(), WatchlistError> {
        if addresses.len() != min_balances.len() || addresses.len() != top_up_amounts.len() {
            return Err(WatchlistError::InvalidWatchList);
        }

        // Build the replacement on the side; swap only on success.
        let mut records = self.records.clone();
        for record in records.values_mut() {
            record.active = false;
        }

        let mut order = Vec::with_capacity(addresses.len());
        for (i, address) in addresses.iter().enumerate() {
            if records.get(address).is_some_and(|r| r.active) {
                return Err(WatchlistError::DuplicateAddress {
                    address: address.clone(),
                });
            }
            if address.is_empty() || top_up_amounts[i] <= 0 {
                return Err(WatchlistError::InvalidWatchList);
            }

            records.insert(
                address.clone(),
                RecipientRecord::new(min_balances[i], top_up_amounts[i]),
            );
            order.push(address.clone());
        }

        self.records = records;
        self.order = order;
        Ok(())
    }

    /// Get the ordered address index
    pub fn addresses(&self) -> &[String] {
        &self.order
    }

    /// Number of watched addresses
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the watchlist is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a recipient record by address.
    ///
    /// Also returns records of dropped (inactive) addresses; callers must
    /// gate on `active`.
    pub fn record(&self, address: &str) -> Option<&RecipientRecord> {
        self.records.get(address)
    }

    /// Mutable record lookup, for the disburser's timestamp update
    pub(crate) fn record_mut(&mut self, address: &str) -> Option<&mut RecipientRecord> {
        self.records.get_mut(address)
    }
}
