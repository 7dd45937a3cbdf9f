//! Monitor - upkeep coordinator and admin surface
//!
//! Ties the components together behind the two-phase invocation protocol:
//!
//! ```text
//! trigger → check (selector, read-only) → opaque candidate payload
//!         → (arbitrary delay)
//!         → act (trigger-only) → disburser (re-validates, transfers)
//! ```
//!
//! The "checked" state lives only in the payload the caller carries, not
//! in monitor state: check and act share no transactional context, and
//! the watchlist, balances, or budget may all change in between. The
//! disburser's live re-validation is the sole correctness mechanism
//! across that gap, and it deliberately excludes the shared budget (see
//! the disburser module docs).
//!
//! The monitor also carries the owner-restricted admin surface:
//! watchlist replacement, trigger/cooldown configuration, pause gating,
//! and funding-pool withdrawal. Pause suspends `check` and `act` only;
//! the direct `top_up` path, withdrawal, and the setters stay available.

pub mod config;

use crate::disburser::{self, TopUpReport, WorkBudget};
use crate::ledger::LedgerClient;
use crate::models::event::{Event, EventLog};
use crate::models::recipient::RecipientRecord;
use crate::models::watchlist::{Watchlist, WatchlistError};
use crate::selector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::MonitorConfig;

/// Errors returned by monitor operations.
///
/// These are all fail-closed validation errors: the call aborts with no
/// state change. Operational failures during disbursement are reported
/// as events instead (see [`crate::models::event::Event`]).
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("caller is not the owner")]
    OnlyOwner,

    #[error("caller is not the configured trigger")]
    OnlyTrigger,

    #[error("monitor is paused")]
    Paused,

    #[error("trigger identity must not be empty")]
    InvalidTrigger,

    #[error("invalid act payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("ledger rejected transfer to {payee}")]
    TransferFailed { payee: String },

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),
}

/// Output of the check phase.
///
/// `payload` is an opaque byte hint the caller hands back to [`Monitor::act`];
/// it is a snapshot, not a commitment, and act re-validates every entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// True when at least one recipient qualifies for funding
    pub needs_funding: bool,

    /// Encoded candidate list for the act phase
    pub payload: Vec<u8>,
}

/// Budget-constrained top-up monitor.
///
/// Owns the watchlist, the configuration, and the event log. The ledger
/// is an injected capability: every operation that reads balances or
/// moves value takes a [`LedgerClient`] parameter, and every
/// time-dependent operation takes `now` (Unix seconds) explicitly.
///
/// # Example
/// ```
/// use funding_monitor_core_rs::{InMemoryLedger, LedgerClient, Monitor, MonitorConfig, WorkBudget};
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.open_account("pool", 150);
/// ledger.open_account("alice", 90);
///
/// let mut monitor = Monitor::new(MonitorConfig::new("owner", "pool", "keeper", 60));
/// monitor
///     .set_watch_list("owner", &["alice".to_string()], &[100], &[50])
///     .unwrap();
///
/// let check = monitor.check(&ledger, 1_000).unwrap();
/// assert!(check.needs_funding);
///
/// let mut work = WorkBudget::new(16);
/// let report = monitor
///     .act("keeper", &mut ledger, &check.payload, 1_000, &mut work)
///     .unwrap();
/// assert_eq!(report.succeeded, 1);
/// assert_eq!(ledger.balance_of("alice"), 140);
/// ```
#[derive(Debug, Clone)]
pub struct Monitor {
    config: MonitorConfig,
    watchlist: Watchlist,
    events: EventLog,
}

impl Monitor {
    /// Create a monitor with an empty watchlist
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            watchlist: Watchlist::new(),
            events: EventLog::new(),
        }
    }

    fn ensure_owner(&self, caller: &str) -> Result<(), MonitorError> {
        if caller != self.config.owner {
            return Err(MonitorError::OnlyOwner);
        }
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<(), MonitorError> {
        if self.config.paused {
            return Err(MonitorError::Paused);
        }
        Ok(())
    }

    // =========================================================================
    // Watchlist administration
    // =========================================================================

    /// Replace the watchlist wholesale (owner only).
    ///
    /// Validation and atomicity semantics are those of
    /// [`Watchlist::replace`]; cooldown history is reset for every entry.
    /// Emits no events.
    pub fn set_watch_list(
        &mut self,
        caller: &str,
        addresses: &[String],
        min_balances: &[i64],
        top_up_amounts: &[i64],
    ) -> Result<(), MonitorError> {
        self.ensure_owner(caller)?;
        self.watchlist
            .replace(addresses, min_balances, top_up_amounts)?;
        Ok(())
    }

    // =========================================================================
    // Two-phase upkeep protocol
    // =========================================================================

    /// List the recipients that currently qualify for funding (read-only,
    /// anyone). Greedy first-fit over the watchlist in stored order; see
    /// [`selector::underfunded_addresses`].
    pub fn underfunded_addresses<L: LedgerClient>(&self, ledger: &L, now: u64) -> Vec<String> {
        selector::underfunded_addresses(
            &self.watchlist,
            ledger,
            &self.config.account_id,
            self.config.cooldown_secs,
            now,
        )
    }

    /// Check phase: read-only automation hook.
    ///
    /// Runs the selector and packages its output as an opaque payload for
    /// a later [`act`](Monitor::act) call.
    ///
    /// # Errors
    /// [`MonitorError::Paused`] while paused.
    pub fn check<L: LedgerClient>(&self, ledger: &L, now: u64) -> Result<CheckResult, MonitorError> {
        self.ensure_not_paused()?;

        let candidates = self.underfunded_addresses(ledger, now);
        let payload = serde_json::to_vec(&candidates)?;
        Ok(CheckResult {
            needs_funding: !candidates.is_empty(),
            payload,
        })
    }

    /// Act phase: privileged automation hook, trigger identity only.
    ///
    /// Decodes the payload produced by [`check`](Monitor::check) and
    /// delegates to the disburser, which re-validates every candidate
    /// against live state.
    ///
    /// # Errors
    /// [`MonitorError::Paused`] while paused, [`MonitorError::OnlyTrigger`]
    /// for any other caller, [`MonitorError::InvalidPayload`] if the bytes
    /// do not decode to an address list.
    pub fn act<L: LedgerClient>(
        &mut self,
        caller: &str,
        ledger: &mut L,
        payload: &[u8],
        now: u64,
        work: &mut WorkBudget,
    ) -> Result<TopUpReport, MonitorError> {
        self.ensure_not_paused()?;
        if caller != self.config.trigger {
            return Err(MonitorError::OnlyTrigger);
        }

        let candidates: Vec<String> = serde_json::from_slice(payload)?;
        Ok(self.top_up(ledger, &candidates, now, work))
    }

    /// Direct disbursement path (anyone; best-effort, never fatal).
    ///
    /// Not pause-gated: pause suspends the coordinator's `check`/`act`
    /// surface only. Outcomes are reported per recipient through the
    /// event log.
    pub fn top_up<L: LedgerClient>(
        &mut self,
        ledger: &mut L,
        candidates: &[String],
        now: u64,
        work: &mut WorkBudget,
    ) -> TopUpReport {
        disburser::top_up(
            &mut self.watchlist,
            ledger,
            &mut self.events,
            &self.config.account_id,
            self.config.cooldown_secs,
            candidates,
            now,
            work,
        )
    }

    // =========================================================================
    // Funding pool
    // =========================================================================

    /// Move funds into the funding pool (anyone).
    ///
    /// # Errors
    /// [`MonitorError::TransferFailed`] if the ledger rejects the
    /// transfer.
    pub fn deposit<L: LedgerClient>(
        &mut self,
        ledger: &mut L,
        from: &str,
        amount: i64,
        now: u64,
    ) -> Result<(), MonitorError> {
        if !ledger.try_transfer(from, &self.config.account_id, amount) {
            return Err(MonitorError::TransferFailed {
                payee: self.config.account_id.clone(),
            });
        }
        self.events.log(Event::FundsReceived {
            at: now,
            from: from.to_string(),
            amount,
            new_balance: ledger.balance_of(&self.config.account_id),
        });
        Ok(())
    }

    /// Withdraw funds from the funding pool to a payee (owner only).
    ///
    /// Available while paused.
    ///
    /// # Errors
    /// [`MonitorError::InsufficientBalance`] if the pool cannot cover the
    /// amount, [`MonitorError::TransferFailed`] if the ledger rejects the
    /// transfer anyway.
    pub fn withdraw<L: LedgerClient>(
        &mut self,
        caller: &str,
        ledger: &mut L,
        payee: &str,
        amount: i64,
        now: u64,
    ) -> Result<(), MonitorError> {
        self.ensure_owner(caller)?;

        let available = ledger.balance_of(&self.config.account_id);
        if available < amount {
            return Err(MonitorError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if !ledger.try_transfer(&self.config.account_id, payee, amount) {
            return Err(MonitorError::TransferFailed {
                payee: payee.to_string(),
            });
        }

        self.events.log(Event::FundsWithdrawn {
            at: now,
            payee: payee.to_string(),
            amount,
        });
        Ok(())
    }

    // =========================================================================
    // Configuration (owner only; available while paused)
    // =========================================================================

    /// Change the trigger identity. Rejects the empty (null) identity.
    pub fn set_trigger(&mut self, caller: &str, new_trigger: &str, now: u64) -> Result<(), MonitorError> {
        self.ensure_owner(caller)?;
        if new_trigger.is_empty() {
            return Err(MonitorError::InvalidTrigger);
        }

        let old = std::mem::replace(&mut self.config.trigger, new_trigger.to_string());
        self.config.version += 1;
        self.events.log(Event::TriggerChanged {
            at: now,
            old,
            new: new_trigger.to_string(),
        });
        Ok(())
    }

    /// Change the cooldown period (seconds between top-ups per recipient)
    pub fn set_cooldown(&mut self, caller: &str, cooldown_secs: u64, now: u64) -> Result<(), MonitorError> {
        self.ensure_owner(caller)?;

        let old_secs = std::mem::replace(&mut self.config.cooldown_secs, cooldown_secs);
        self.config.version += 1;
        self.events.log(Event::CooldownChanged {
            at: now,
            old_secs,
            new_secs: cooldown_secs,
        });
        Ok(())
    }

    /// Suspend the check and act phases
    pub fn pause(&mut self, caller: &str) -> Result<(), MonitorError> {
        self.ensure_owner(caller)?;
        self.config.paused = true;
        self.config.version += 1;
        Ok(())
    }

    /// Resume the check and act phases
    pub fn unpause(&mut self, caller: &str) -> Result<(), MonitorError> {
        self.ensure_owner(caller)?;
        self.config.paused = false;
        self.config.version += 1;
        Ok(())
    }

    // =========================================================================
    // Read-only accessors
    // =========================================================================

    /// Current configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// The watchlist store
    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Per-recipient record lookup (including inactive records)
    pub fn recipient(&self, address: &str) -> Option<&RecipientRecord> {
        self.watchlist.record(address)
    }

    /// The event log
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}
