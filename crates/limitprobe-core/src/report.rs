//! Run report and the isolation checks evaluated over it.

use crate::burst::BurstResult;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// Everything a run observed, with stable field names. Serialized to stdout
/// in full before the pass/fail decision is finalized, so a failing run
/// still leaves the raw counts behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Burst against the users target, credential A (cross-service
    /// experiment).
    pub users_burst: BurstResult,
    /// Status of the single orders probe fired right after `users_burst`,
    /// same credential. `None` means the probe died in transit.
    pub orders_probe_status: Option<u16>,
    /// Burst against the users target, credential A again, in a fresh
    /// window (cross-identity experiment).
    pub identity_a_burst: BurstResult,
    /// Status of the users probe fired right after `identity_a_burst` with
    /// credential B.
    pub identity_b_probe_status: Option<u16>,
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// A named pass/fail condition over a finished run.
pub struct Check {
    pub label: &'static str,
    pub holds: fn(&RunReport) -> bool,
}

/// The five isolation checks. Throttling must trigger inside each burst
/// without rejecting it wholesale, and neither the sibling service nor the
/// second identity may see any of it.
pub const CHECKS: &[Check] = &[
    Check {
        label: "users burst sees at least one 429",
        holds: |r| r.users_burst.throttled > 0,
    },
    Check {
        label: "users burst sees at least one 200",
        holds: |r| r.users_burst.allowed > 0,
    },
    Check {
        label: "orders probe not throttled by users burst",
        holds: |r| r.orders_probe_status != Some(429),
    },
    Check {
        label: "second users burst sees at least one 429",
        holds: |r| r.identity_a_burst.throttled > 0,
    },
    Check {
        label: "second identity probe allowed in same window",
        holds: |r| r.identity_b_probe_status == Some(200),
    },
];

/// Labels of every check that does not hold. Empty means the run passed.
pub fn evaluate(report: &RunReport) -> Vec<&'static str> {
    CHECKS
        .iter()
        .filter(|check| !(check.holds)(report))
        .map(|check| check.label)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
