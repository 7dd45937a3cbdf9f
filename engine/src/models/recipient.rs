//! Recipient record model
//!
//! A recipient is a ledger account the monitor keeps funded. Each record
//! carries the funding parameters set at registration time plus the
//! timestamp of the last successful top-up (for cooldown enforcement).
//!
//! CRITICAL: All money values are i64 (minor units); timestamps are u64
//! Unix seconds.

use serde::{Deserialize, Serialize};

/// Per-recipient funding parameters and cooldown state.
///
/// Records are owned by the [`Watchlist`](crate::models::watchlist::Watchlist):
/// they are created or overwritten by watchlist replacement and their
/// `last_top_up_time` is bumped by the disburser on successful transfer.
///
/// A record with `active == false` belongs to an address that was dropped
/// from the watchlist. Its stored values persist inertly until the address
/// is re-registered, at which point the record is reset wholesale
/// (including `last_top_up_time = 0`).
///
/// # Example
/// ```
/// use funding_monitor_core_rs::RecipientRecord;
///
/// let rec = RecipientRecord::new(100_00, 50_00);
/// assert!(rec.active);
/// assert_eq!(rec.last_top_up_time, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRecord {
    /// Whether the address is currently on the watchlist
    pub active: bool,

    /// Balance threshold below which the recipient qualifies for funding
    /// (i64 minor units)
    pub min_balance: i64,

    /// Fixed amount transferred per top-up (i64 minor units, > 0 while
    /// active)
    pub top_up_amount: i64,

    /// Unix timestamp (seconds) of the last successful top-up; 0 if never
    /// topped up since registration
    pub last_top_up_time: u64,
}

impl RecipientRecord {
    /// Create a fresh active record with no cooldown history.
    pub fn new(min_balance: i64, top_up_amount: i64) -> Self {
        Self {
            active: true,
            min_balance,
            top_up_amount,
            last_top_up_time: 0,
        }
    }

    /// Check whether the cooldown period has elapsed at `now`.
    ///
    /// The boundary is inclusive: a recipient last topped up at time T
    /// becomes eligible again at exactly `T + cooldown_secs`.
    ///
    /// # Example
    /// ```
    /// use funding_monitor_core_rs::RecipientRecord;
    ///
    /// let mut rec = RecipientRecord::new(100_00, 50_00);
    /// rec.last_top_up_time = 1_000;
    ///
    /// assert!(!rec.cooldown_elapsed(60, 1_059));
    /// assert!(rec.cooldown_elapsed(60, 1_060)); // boundary inclusive
    /// assert!(rec.cooldown_elapsed(60, 1_061));
    /// ```
    pub fn cooldown_elapsed(&self, cooldown_secs: u64, now: u64) -> bool {
        self.last_top_up_time.saturating_add(cooldown_secs) <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_active_with_zero_timestamp() {
        let rec = RecipientRecord::new(200_00, 75_00);

        assert!(rec.active);
        assert_eq!(rec.min_balance, 200_00);
        assert_eq!(rec.top_up_amount, 75_00);
        assert_eq!(rec.last_top_up_time, 0);
    }

    #[test]
    fn test_cooldown_boundary_is_inclusive() {
        let mut rec = RecipientRecord::new(100_00, 50_00);
        rec.last_top_up_time = 500;

        assert!(!rec.cooldown_elapsed(100, 599));
        assert!(rec.cooldown_elapsed(100, 600));
        assert!(rec.cooldown_elapsed(100, 601));
    }

    #[test]
    fn test_cooldown_never_overflows() {
        let mut rec = RecipientRecord::new(100_00, 50_00);
        rec.last_top_up_time = u64::MAX - 10;

        // Saturating add: never panics, simply stays ineligible
        assert!(!rec.cooldown_elapsed(u64::MAX, u64::MAX - 1));
    }

    #[test]
    fn test_zero_cooldown_always_elapsed() {
        let mut rec = RecipientRecord::new(100_00, 50_00);
        rec.last_top_up_time = 42;

        assert!(rec.cooldown_elapsed(0, 42));
        assert!(rec.cooldown_elapsed(0, 43));
    }
}
