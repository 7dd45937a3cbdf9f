//! Underfunded selector
//!
//! Pure, read-only pass over the watchlist that decides which recipients
//! should be funded this round. The shared funding budget is the funder
//! account's current ledger balance; its consumption is simulated locally
//! over the list in stored order and never persisted.
//!
//! # Greedy first-fit allocation
//!
//! Selection walks the watchlist in insertion order and debits a local
//! budget copy for each selected recipient before considering the next
//! one. Earlier recipients therefore have priority claim on the budget:
//! a recipient can be excluded purely because earlier recipients already
//! exhausted the simulated budget, even though its own thresholds would
//! qualify it. Reordering the watchlist changes outcomes.

use crate::ledger::LedgerClient;
use crate::models::watchlist::Watchlist;

/// Select the recipients that qualify for a top-up this round.
///
/// A recipient is eligible when all three hold:
/// 1. its cooldown has elapsed (`last_top_up_time + cooldown <= now`,
///    boundary inclusive),
/// 2. the remaining simulated budget covers its top-up amount,
/// 3. its current ledger balance is below its minimum threshold.
///
/// Inactive records never appear in the ordered index, so dropped
/// addresses are skipped implicitly; the `active` gate here is a cheap
/// re-check against records mutated out from under the index.
///
/// The result preserves watchlist order and can be shorter than the
/// watchlist; it is exactly the set a subsequent
/// [`top_up`](crate::disburser::top_up) call would fund if nothing
/// changed in between.
pub fn underfunded_addresses<L: LedgerClient>(
    watchlist: &Watchlist,
    ledger: &L,
    funder: &str,
    cooldown_secs: u64,
    now: u64,
) -> Vec<String> {
    let mut budget = ledger.balance_of(funder);
    let mut selected = Vec::new();

    for address in watchlist.addresses() {
        let Some(record) = watchlist.record(address) else {
            continue;
        };
        if !record.active {
            continue;
        }

        let eligible = record.cooldown_elapsed(cooldown_secs, now)
            && budget >= record.top_up_amount
            && ledger.balance_of(address) < record.min_balance;

        if eligible {
            selected.push(address.clone());
            // Earlier recipients claim the shared budget first
            budget -= record.top_up_amount;
        }
    }

    selected
}
