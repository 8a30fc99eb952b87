//! Run configuration. Defaults match the demo gateway stack the harness was
//! written against; every field can be overridden from the CLI or env.

// ---------------------------------------------------------------------------
// HarnessConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the gateway under test.
    pub api_base_url: String,
    /// Base URL of the authentication service issuing bearer tokens.
    pub auth_base_url: String,
    pub username: String,
    pub password: String,
    /// Requests per burst. Must exceed the limiter's per-window quota for
    /// the throttling checks to have a chance of passing.
    pub burst_requests: u32,
    pub users_path: String,
    pub orders_path: String,
    /// Length of the gateway's rate window in milliseconds. Must be
    /// non-zero and match the limiter's actual window for alignment to
    /// mean anything.
    pub window_ms: u64,
    /// Extra sleep past the window boundary, to clear sub-millisecond
    /// boundary ambiguity.
    pub align_margin_ms: u64,
    /// Per-request transport timeout. A timeout during a burst counts as an
    /// `other` outcome; during login it is fatal.
    pub request_timeout_ms: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8085".to_string(),
            auth_base_url: "http://localhost:8084".to_string(),
            username: "user_all".to_string(),
            password: "123".to_string(),
            burst_requests: 8,
            users_path: "/api/v1/users".to_string(),
            orders_path: "/api/v1/orders".to_string(),
            window_ms: 1000,
            align_margin_ms: 30,
            request_timeout_ms: 5000,
        }
    }
}
