//! The run itself: two ordered isolation experiments over one gateway.
//!
//! Experiment A exhausts a (service, identity) quota and immediately touches
//! a sibling service with the same credential. Experiment B exhausts the
//! same quota again in a fresh window and immediately touches the same
//! service with a second credential. The limiter passes only if each burst
//! was throttled and neither probe was.

use std::time::Duration;

use crate::auth::{self, Identity};
use crate::burst::{self, Target};
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::report::{self, RunReport};
use crate::window;

// ---------------------------------------------------------------------------
// RunOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    /// Labels of the checks that did not hold; empty on a passing run.
    pub failures: Vec<&'static str>,
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Execute one full run. Re-invocable: all state lives in locals, so a CI
/// matrix can call this repeatedly against differently-configured limiters.
///
/// The sequence is strictly linear with no retries anywhere; a retry would
/// smear requests across window boundaries and corrupt the counts. The only
/// fatal errors are client construction and login. Everything after that
/// is absorbed into classification counts and judged by the checks.
pub fn run(config: &HarnessConfig) -> Result<RunOutcome> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .build()?;

    let identity = Identity {
        username: config.username.clone(),
        password: config.password.clone(),
    };
    // Two logins yield two distinct bearer tokens; the gateway scopes its
    // quotas per token, which is what makes credential B an independent
    // caller in experiment B.
    let credential_a = auth::acquire(&client, &config.auth_base_url, &identity)?;
    let credential_b = auth::acquire(&client, &config.auth_base_url, &identity)?;

    let users = Target::new(&config.api_base_url, &config.users_path);
    let orders = Target::new(&config.api_base_url, &config.orders_path);

    // Experiment A: same credential, sibling service.
    tracing::info!(path = %users.path, count = config.burst_requests, "cross-service experiment");
    window::align_to_window_start(config.window_ms, config.align_margin_ms);
    let users_burst = burst::burst(&client, &users, &credential_a, config.burst_requests);
    let orders_probe_status = burst::probe(&client, &orders, &credential_a);

    // Experiment B: same service, second credential. Re-align so the burst
    // gets a fresh window with a clean quota.
    tracing::info!(path = %users.path, count = config.burst_requests, "cross-identity experiment");
    window::align_to_window_start(config.window_ms, config.align_margin_ms);
    let identity_a_burst = burst::burst(&client, &users, &credential_a, config.burst_requests);
    let identity_b_probe_status = burst::probe(&client, &users, &credential_b);

    let report = RunReport {
        users_burst,
        orders_probe_status,
        identity_a_burst,
        identity_b_probe_status,
    };
    let failures = report::evaluate(&report);
    Ok(RunOutcome { report, failures })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
