//! Rate limiting errors.

use std::time::Duration;

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    /// The client is blocked and may retry after the given duration.
    #[error("client is blocked, retry after {}s", retry_after.as_secs())]
    Blocked {
        /// Time until the block lapses.
        retry_after: Duration,
    },
}

impl RateLimitError {
    /// Time until the client may retry.
    pub fn retry_after(&self) -> Duration {
        match self {
            Self::Blocked { retry_after } => *retry_after,
        }
    }
}
