//! Event logging for auditing and replay.
//!
//! Every observable state change the monitor performs is captured as an
//! Event: per-recipient top-up outcomes, funding movements, and
//! configuration changes. Events enable:
//! - Auditing (verify which recipients were funded and when)
//! - Debugging (understand what happened and when)
//! - Analysis (extract funding metrics)
//!
//! Watchlist replacement deliberately emits no event; callers that need
//! an audit trail for registration changes must read the record getters.

use serde::{Deserialize, Serialize};

/// Monitor event capturing a state change.
///
/// All events include `at`, the Unix timestamp (seconds) when the
/// operation ran. Events are logged in the order they occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Funds arrived in the funding account
    FundsReceived {
        at: u64,
        from: String,
        amount: i64,
        new_balance: i64,
    },

    /// Owner withdrew funds from the funding account
    FundsWithdrawn {
        at: u64,
        payee: String,
        amount: i64,
    },

    /// A top-up transfer succeeded; the recipient's cooldown timestamp
    /// was set to `at`
    TopUpSucceeded {
        at: u64,
        recipient: String,
        amount: i64,
    },

    /// The ledger reported a failed top-up transfer; the recipient's
    /// record was left unchanged
    TopUpFailed {
        at: u64,
        recipient: String,
        amount: i64,
    },

    /// The trigger identity was changed by the owner
    TriggerChanged { at: u64, old: String, new: String },

    /// The cooldown period was changed by the owner
    CooldownChanged {
        at: u64,
        old_secs: u64,
        new_secs: u64,
    },
}

impl Event {
    /// Get the timestamp when this event occurred
    pub fn at(&self) -> u64 {
        match self {
            Event::FundsReceived { at, .. } => *at,
            Event::FundsWithdrawn { at, .. } => *at,
            Event::TopUpSucceeded { at, .. } => *at,
            Event::TopUpFailed { at, .. } => *at,
            Event::TriggerChanged { at, .. } => *at,
            Event::CooldownChanged { at, .. } => *at,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::FundsReceived { .. } => "FundsReceived",
            Event::FundsWithdrawn { .. } => "FundsWithdrawn",
            Event::TopUpSucceeded { .. } => "TopUpSucceeded",
            Event::TopUpFailed { .. } => "TopUpFailed",
            Event::TriggerChanged { .. } => "TriggerChanged",
            Event::CooldownChanged { .. } => "CooldownChanged",
        }
    }

    /// Get the recipient address if the event relates to a specific
    /// recipient
    pub fn recipient(&self) -> Option<&str> {
        match self {
            Event::TopUpSucceeded { recipient, .. } => Some(recipient),
            Event::TopUpFailed { recipient, .. } => Some(recipient),
            _ => None,
        }
    }
}

/// Event log for storing and querying monitor events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific recipient
    pub fn events_for_recipient(&self, recipient: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.recipient() == Some(recipient))
            .collect()
    }

    /// Get events at or after a timestamp
    pub fn events_since(&self, at: u64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.at() >= at).collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
