//! Disburser
//!
//! Executes top-up transfers for a list of candidate recipients. The
//! candidate list is a hint computed earlier (possibly much earlier) by
//! the selector, so every candidate is re-validated against live state at
//! execution time; re-validation is what preserves correctness across the
//! check/act gap, not payload freshness.
//!
//! The shared funding budget is deliberately NOT re-checked here: it was
//! simulated once at selection time, and concurrent or repeated calls
//! within one funding cycle can collectively attempt more than the funder
//! balance. Transfers simply fail gracefully once funds run out, and
//! failed recipients stay eligible for a future round.
//!
//! # Work budget
//!
//! Each invocation carries an explicit [`WorkBudget`]. One unit is spent
//! per candidate processed (eligible or not); when the remainder falls
//! below a fixed reserve the batch stops immediately. The abort is
//! cooperative and silent: nothing distinguishes "processed everyone"
//! from "stopped early", and idempotent retry is safe.

use crate::ledger::LedgerClient;
use crate::models::event::{Event, EventLog};
use crate::models::watchlist::Watchlist;

/// Work units spent per candidate processed
pub const WORK_PER_CANDIDATE: u64 = 1;

/// Remaining work below which the disburser stops early, guaranteeing
/// enough residual capacity to return cleanly
pub const MIN_WORK_RESERVE: u64 = 1;

/// Explicit per-call work counter.
///
/// Replaces platform resource metering with a deterministic, injectable
/// counter so the early-exit behavior is fully testable.
///
/// # Example
/// ```
/// use funding_monitor_core_rs::WorkBudget;
///
/// let mut budget = WorkBudget::new(3);
/// budget.spend(1);
/// assert_eq!(budget.remaining(), 2);
/// assert!(!budget.below_reserve());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkBudget {
    remaining: u64,
}

impl WorkBudget {
    /// Create a budget with the given number of work units
    pub fn new(units: u64) -> Self {
        Self { remaining: units }
    }

    /// Spend work units (saturating at zero)
    pub fn spend(&mut self, units: u64) {
        self.remaining = self.remaining.saturating_sub(units);
    }

    /// Remaining work units
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Check whether the remainder has fallen below the safety reserve
    pub fn below_reserve(&self) -> bool {
        self.remaining < MIN_WORK_RESERVE
    }
}

/// Per-call disbursement summary.
///
/// Mirrors the event log only: success and failure counts correspond
/// one-to-one with `TopUpSucceeded`/`TopUpFailed` events. Silently
/// skipped candidates and early exit leave no trace here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopUpReport {
    /// Transfers the ledger reported as successful
    pub succeeded: usize,

    /// Transfers the ledger reported as failed
    pub failed: usize,
}

/// Execute top-ups for the given candidates, in the order given.
///
/// For each candidate the live record is re-fetched and eligibility is
/// re-checked with the same three-part condition the selector uses
/// (active, cooldown elapsed, balance below minimum), minus the shared
/// budget. Eligible candidates get a `try_transfer` of their top-up
/// amount:
/// - success: `last_top_up_time` is set to `now` and `TopUpSucceeded`
///   is logged;
/// - reported failure: `TopUpFailed` is logged and the record is left
///   unchanged (no cooldown penalty, eligible again next round).
///
/// Candidates not eligible at execution time (already funded by a
/// concurrent call, now inactive, unknown) are skipped silently with no
/// event.
///
/// After each candidate one work unit is spent; if the budget falls
/// below its reserve the remaining candidates are not processed.
#[allow(clippy::too_many_arguments)]
pub fn top_up<L: LedgerClient>(
    watchlist: &mut Watchlist,
    ledger: &mut L,
    events: &mut EventLog,
    funder: &str,
    cooldown_secs: u64,
    candidates: &[String],
    now: u64,
    work: &mut WorkBudget,
) -> TopUpReport {
    let mut report = TopUpReport::default();

    for candidate in candidates {
        // Re-fetch the live record; the candidate list may be stale.
        let amount = match watchlist.record(candidate) {
            Some(record)
                if record.active
                    && record.cooldown_elapsed(cooldown_secs, now)
                    && ledger.balance_of(candidate) < record.min_balance =>
            {
                Some(record.top_up_amount)
            }
            _ => None,
        };

        if let Some(amount) = amount {
            if ledger.try_transfer(funder, candidate, amount) {
                if let Some(record) = watchlist.record_mut(candidate) {
                    record.last_top_up_time = now;
                }
                events.log(Event::TopUpSucceeded {
                    at: now,
                    recipient: candidate.clone(),
                    amount,
                });
                report.succeeded += 1;
            } else {
                events.log(Event::TopUpFailed {
                    at: now,
                    recipient: candidate.clone(),
                    amount,
                });
                report.failed += 1;
            }
        }

        work.spend(WORK_PER_CANDIDATE);
        if work.below_reserve() {
            break;
        }
    }

    report
}
