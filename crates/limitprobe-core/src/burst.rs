//! Burst emission and response classification.
//!
//! A burst is a fixed count of strictly sequential GETs fired as fast as the
//! transport allows, so its wall-clock footprint stays small enough to fit
//! inside one rate window. Every response is classified exactly once;
//! nothing is retried.

use crate::auth::Credential;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// A rate-limited resource: base URL plus path. The two targets of a run
/// share a base URL but sit behind distinct limiter scopes.
#[derive(Debug, Clone)]
pub struct Target {
    pub base_url: String,
    pub path: String,
}

impl Target {
    pub fn new(base_url: &str, path: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            path: path.to_string(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}

// ---------------------------------------------------------------------------
// Outcome / BurstResult
// ---------------------------------------------------------------------------

/// Classification bucket for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allowed,
    Throttled,
    Other,
}

/// Map a status code to its bucket. 200 means the limiter let the request
/// through, 429 means it throttled it; everything else (including transport
/// failures, passed as `None`) is lumped into `Other`.
pub fn classify(status: Option<u16>) -> Outcome {
    match status {
        Some(200) => Outcome::Allowed,
        Some(429) => Outcome::Throttled,
        _ => Outcome::Other,
    }
}

/// Classification counts for one burst. Fresh per call, immutable after
/// return; `allowed + throttled + other` always equals the request count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstResult {
    pub allowed: u32,
    pub throttled: u32,
    pub other: u32,
}

impl BurstResult {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Allowed => self.allowed += 1,
            Outcome::Throttled => self.throttled += 1,
            Outcome::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.allowed + self.throttled + self.other
    }
}

// ---------------------------------------------------------------------------
// burst / probe
// ---------------------------------------------------------------------------

/// Fire `count` sequential GETs at `target` and accumulate classifications.
/// A transport failure counts as `Other` and never aborts the burst.
pub fn burst(
    client: &reqwest::blocking::Client,
    target: &Target,
    credential: &Credential,
    count: u32,
) -> BurstResult {
    let mut result = BurstResult::default();
    for i in 0..count {
        let status = send_get(client, target, credential);
        let outcome = classify(status);
        tracing::debug!(request = i, status = ?status, outcome = ?outcome, "burst request");
        result.record(outcome);
    }
    result
}

/// One isolated GET, returning the raw status (`None` on transport failure).
/// Probes check exact statuses, so the result is not bucketed.
pub fn probe(
    client: &reqwest::blocking::Client,
    target: &Target,
    credential: &Credential,
) -> Option<u16> {
    let status = send_get(client, target, credential);
    tracing::debug!(path = %target.path, status = ?status, "probe request");
    status
}

fn send_get(
    client: &reqwest::blocking::Client,
    target: &Target,
    credential: &Credential,
) -> Option<u16> {
    match client
        .get(target.url())
        .header(reqwest::header::AUTHORIZATION, credential.bearer())
        .send()
    {
        Ok(response) => Some(response.status().as_u16()),
        Err(err) => {
            tracing::warn!(error = %err, url = %target.url(), "request failed in transit");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
