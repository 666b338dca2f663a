//! Rate limiter configuration.

use std::time::Duration;

/// Configuration for the submission rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Whether limiting is applied at all.
    pub enabled: bool,
    /// Submissions allowed per client per minute.
    pub max_per_minute: u32,
    /// How long a client stays blocked after exceeding the limit.
    pub block_duration: Duration,
    /// Client addresses exempt from limiting (matched on the raw address).
    pub whitelist: Vec<String>,
}

impl RateLimiterConfig {
    /// Default submissions per minute.
    pub const DEFAULT_MAX_PER_MINUTE: u32 = 5;
    /// Default block duration.
    pub const DEFAULT_BLOCK_DURATION: Duration = Duration::from_secs(60 * 60);

    /// Create a config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch limiting on or off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the per-minute submission budget.
    pub fn with_max_per_minute(mut self, max: u32) -> Self {
        self.max_per_minute = max;
        self
    }

    /// Set how long offenders stay blocked.
    pub fn with_block_duration(mut self, duration: Duration) -> Self {
        self.block_duration = duration;
        self
    }

    /// Replace the whitelist.
    pub fn with_whitelist(mut self, whitelist: Vec<String>) -> Self {
        self.whitelist = whitelist;
        self
    }

    /// Add one client address to the whitelist.
    pub fn whitelist_client(mut self, client: impl Into<String>) -> Self {
        self.whitelist.push(client.into());
        self
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_per_minute: Self::DEFAULT_MAX_PER_MINUTE,
            block_duration: Self::DEFAULT_BLOCK_DURATION,
            whitelist: Vec::new(),
        }
    }
}
