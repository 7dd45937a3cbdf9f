//! Monitor configuration
//!
//! Global mutable configuration held by the monitor: the owner and
//! trigger identities, the funding account, the cooldown period, and the
//! pause flag. Administrative mutation goes through the monitor's setter
//! API, which emits change events; the `version` counter bumps on every
//! such mutation so callers can detect configuration churn between reads.

use serde::{Deserialize, Serialize};

/// Versioned monitor configuration.
///
/// Constructed once at monitor creation; mutated only through the
/// owner-restricted setters on [`Monitor`](crate::monitor::Monitor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Identity allowed to call the administrative setters and withdraw
    pub owner: String,

    /// Ledger account holding the funding pool; its balance is the
    /// shared top-up budget
    pub account_id: String,

    /// The only identity authorized to invoke the act phase
    pub trigger: String,

    /// Minimum seconds between two top-ups of the same recipient
    pub cooldown_secs: u64,

    /// When true, the check and act phases are suspended
    pub paused: bool,

    /// Bumped on every administrative mutation
    pub version: u64,
}

impl MonitorConfig {
    /// Create an initial configuration (unpaused, version 1).
    ///
    /// # Panics
    /// Panics if `owner`, `account_id`, or `trigger` is empty; identities
    /// are caller-supplied ledger account ids and the empty string is the
    /// null identity.
    pub fn new(owner: &str, account_id: &str, trigger: &str, cooldown_secs: u64) -> Self {
        assert!(!owner.is_empty(), "owner must not be empty");
        assert!(!account_id.is_empty(), "account_id must not be empty");
        assert!(!trigger.is_empty(), "trigger must not be empty");
        Self {
            owner: owner.to_string(),
            account_id: account_id.to_string(),
            trigger: trigger.to_string(),
            cooldown_secs,
            paused: false,
            version: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_defaults() {
        let config = MonitorConfig::new("owner", "pool", "keeper", 60);

        assert_eq!(config.owner, "owner");
        assert_eq!(config.account_id, "pool");
        assert_eq!(config.trigger, "keeper");
        assert_eq!(config.cooldown_secs, 60);
        assert!(!config.paused);
        assert_eq!(config.version, 1);
    }

    #[test]
    #[should_panic(expected = "trigger must not be empty")]
    fn test_empty_trigger_rejected() {
        MonitorConfig::new("owner", "pool", "", 60);
    }
}
