//! Disbursement behavior: re-validation, failure tolerance, work budget.

use funding_monitor_core_rs::{
    InMemoryLedger, LedgerClient, Monitor, MonitorConfig, TopUpReport, WorkBudget,
};

const OWNER: &str = "owner";
const POOL: &str = "pool";
const KEEPER: &str = "keeper";

/// Ledger double whose transfers always fail, for exercising the
/// failure path deterministically.
struct RefusingLedger {
    inner: InMemoryLedger,
}

impl LedgerClient for RefusingLedger {
    fn balance_of(&self, account: &str) -> i64 {
        self.inner.balance_of(account)
    }

    fn try_transfer(&mut self, _from: &str, _to: &str, _amount: i64) -> bool {
        false
    }
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn setup(
    entries: &[(&str, i64, i64, i64)],
    pool_balance: i64,
    cooldown_secs: u64,
) -> (Monitor, InMemoryLedger) {
    let mut ledger = InMemoryLedger::new();
    ledger.open_account(POOL, pool_balance);

    let mut addresses = Vec::new();
    let mut mins = Vec::new();
    let mut amounts = Vec::new();
    for (address, balance, min, top_up) in entries {
        ledger.open_account(address, *balance);
        addresses.push(address.to_string());
        mins.push(*min);
        amounts.push(*top_up);
    }

    let mut monitor = Monitor::new(MonitorConfig::new(OWNER, POOL, KEEPER, cooldown_secs));
    monitor
        .set_watch_list(OWNER, &addresses, &mins, &amounts)
        .unwrap();
    (monitor, ledger)
}

#[test]
fn test_failed_transfer_never_bumps_timestamp() {
    let (mut monitor, ledger) = setup(&[("alice", 0, 100, 50)], 1_000, 60);
    let mut refusing = RefusingLedger { inner: ledger };
    let mut work = WorkBudget::new(8);

    let report = monitor.top_up(&mut refusing, &ids(&["alice"]), 500, &mut work);

    assert_eq!(report, TopUpReport { succeeded: 0, failed: 1 });
    assert_eq!(monitor.recipient("alice").unwrap().last_top_up_time, 0);
    assert_eq!(monitor.events().events_of_type("TopUpFailed").len(), 1);

    // No cooldown penalty: the same recipient is immediately retryable
    let report = monitor.top_up(&mut refusing, &ids(&["alice"]), 501, &mut work);
    assert_eq!(report.failed, 1);
}

#[test]
fn test_second_call_within_cooldown_skips_silently() {
    let (mut monitor, mut ledger) = setup(&[("alice", 0, 200, 50)], 1_000, 3_600);
    let mut work = WorkBudget::new(8);

    // First call funds alice (still below min afterwards)
    let first = monitor.top_up(&mut ledger, &ids(&["alice"]), 1_000, &mut work);
    assert_eq!(first.succeeded, 1);

    // Replay of the same (now stale) candidate list: cooldown not elapsed,
    // silent skip, no event, no transfer
    let second = monitor.top_up(&mut ledger, &ids(&["alice"]), 1_030, &mut work);
    assert_eq!(second, TopUpReport::default());
    assert_eq!(ledger.balance_of("alice"), 50);
    assert_eq!(monitor.events().events_for_recipient("alice").len(), 1);
}

#[test]
fn test_dropped_recipient_is_skipped_at_execution_time() {
    let (mut monitor, mut ledger) = setup(&[("alice", 0, 100, 50), ("bob", 0, 100, 50)], 1_000, 0);
    let stale_candidates = ids(&["alice", "bob"]);

    // Watchlist changes between check and act: bob is dropped
    monitor
        .set_watch_list(OWNER, &ids(&["alice"]), &[100], &[50])
        .unwrap();

    let mut work = WorkBudget::new(8);
    let report = monitor.top_up(&mut ledger, &stale_candidates, 10, &mut work);

    assert_eq!(report.succeeded, 1);
    assert_eq!(ledger.balance_of("alice"), 50);
    assert_eq!(ledger.balance_of("bob"), 0);
    assert!(monitor.events().events_for_recipient("bob").is_empty());
}

#[test]
fn test_work_budget_abort_is_silent_partial_completion() {
    let (mut monitor, mut ledger) = setup(
        &[
            ("a", 0, 100, 50),
            ("b", 0, 100, 50),
            ("c", 0, 100, 50),
            ("d", 0, 100, 50),
        ],
        1_000,
        0,
    );

    let mut work = WorkBudget::new(2);
    let report = monitor.top_up(&mut ledger, &ids(&["a", "b", "c", "d"]), 10, &mut work);

    // Only the first two candidates were processed
    assert_eq!(report.succeeded, 2);
    assert_eq!(ledger.balance_of("c"), 0);
    assert_eq!(ledger.balance_of("d"), 0);

    // Idempotent retry with a fresh budget picks up the remainder
    let mut work = WorkBudget::new(8);
    let retry = monitor.top_up(&mut ledger, &ids(&["a", "b", "c", "d"]), 10, &mut work);
    assert_eq!(retry.succeeded, 2);
    assert_eq!(ledger.balance_of("c"), 50);
    assert_eq!(ledger.balance_of("d"), 50);
}

#[test]
fn test_budget_overdraw_across_calls_fails_gracefully() {
    // The shared budget is simulated at check time only. Two disbursement
    // calls in one funding cycle can attempt more than the pool holds;
    // the overdraw surfaces as failed transfers, never as an abort.
    let (mut monitor, mut ledger) = setup(&[("a", 0, 100, 60), ("b", 0, 100, 60)], 100, 0);

    let mut work = WorkBudget::new(8);
    let first = monitor.top_up(&mut ledger, &ids(&["a"]), 10, &mut work);
    let second = monitor.top_up(&mut ledger, &ids(&["b"]), 11, &mut work);

    assert_eq!(first.succeeded, 1);
    assert_eq!(second, TopUpReport { succeeded: 0, failed: 1 });
    assert_eq!(ledger.balance_of(POOL), 40);
    assert_eq!(monitor.recipient("b").unwrap().last_top_up_time, 0);
}

#[test]
fn test_candidates_processed_in_given_order() {
    let (mut monitor, mut ledger) = setup(&[("a", 0, 100, 80), ("b", 0, 100, 80)], 100, 0);

    // Pool covers only one transfer; the order of the candidate list
    // decides who gets it.
    let mut work = WorkBudget::new(8);
    monitor.top_up(&mut ledger, &ids(&["b", "a"]), 10, &mut work);

    assert_eq!(ledger.balance_of("b"), 80);
    assert_eq!(ledger.balance_of("a"), 0);
}
