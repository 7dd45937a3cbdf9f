//! Funding Monitor Core - Rust Engine
//!
//! Budget-constrained, rate-limited top-up engine: watches a list of
//! recipient accounts and, under a shared funding budget and per-recipient
//! cooldown, selects and executes fixed-size top-up transfers.
//!
//! # Architecture
//!
//! - **models**: Domain types (RecipientRecord, Watchlist, Event)
//! - **ledger**: External value-transfer capability (LedgerClient)
//! - **selector**: Read-only greedy selection of underfunded recipients
//! - **disburser**: Transfer execution with live re-validation and a
//!   bounded per-call work budget
//! - **monitor**: Two-phase check/act coordinator plus the owner-only
//!   admin surface
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units); timestamps are u64 seconds
//! 2. No ambient clock or resource metering: `now` and the work budget
//!    are explicit parameters, so every run is deterministic
//! 3. The check phase is read-only; only the act/top-up path mutates
//!    recipient state, and only on transfers the ledger reports as
//!    successful

// Module declarations
pub mod disburser;
pub mod ledger;
pub mod models;
pub mod monitor;
pub mod selector;

// Re-exports for convenience
pub use disburser::{top_up, TopUpReport, WorkBudget, MIN_WORK_RESERVE, WORK_PER_CANDIDATE};
pub use ledger::{InMemoryLedger, LedgerClient};
pub use models::{
    event::{Event, EventLog},
    recipient::RecipientRecord,
    watchlist::{Watchlist, WatchlistError},
};
pub use monitor::{CheckResult, Monitor, MonitorConfig, MonitorError};
pub use selector::underfunded_addresses;
