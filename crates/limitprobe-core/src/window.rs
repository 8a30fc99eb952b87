//! Best-effort alignment to the gateway's rate-window boundary.
//!
//! The limiter's window boundaries are not queryable, so the harness sleeps
//! until just past the next boundary of its own clock and assumes the two
//! clocks agree to within the margin. This maximizes the odds that a burst
//! lands inside one window; it does not guarantee it (network jitter, clock
//! skew), and callers must tolerate the residual flakiness.

use std::time::Duration;

/// How long to wait so that execution resumes `margin_ms` past the next
/// window boundary. Pure; `now_ms` is wall-clock milliseconds since the
/// epoch and `window_ms` must be non-zero.
pub fn alignment_wait(now_ms: i64, window_ms: u64, margin_ms: u64) -> Duration {
    let window = window_ms as i64;
    let into_window = now_ms.rem_euclid(window);
    Duration::from_millis((window - into_window) as u64 + margin_ms)
}

/// Sleep until shortly after the next window boundary.
pub fn align_to_window_start(window_ms: u64, margin_ms: u64) {
    let wait = alignment_wait(chrono::Utc::now().timestamp_millis(), window_ms, margin_ms);
    tracing::debug!(wait_ms = wait.as_millis() as u64, "waiting for window start");
    std::thread::sleep(wait);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
