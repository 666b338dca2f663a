//! Submission rate limiting for the QuoteKit quote-request service.
//!
//! Public quote forms attract scripted submissions; [`RateLimiter`] keeps
//! them in check with a sliding 60 s window per client and a block list
//! for offenders. Clients are identified by caller-supplied address
//! strings but stored only as SHA-256 digests.
//!
//! # Quick Start
//!
//! ```rust
//! use quotekit_limit::{RateLimiter, RateLimiterConfig};
//!
//! let limiter = RateLimiter::new(RateLimiterConfig::default());
//!
//! match limiter.check("203.0.113.7") {
//!     Ok(()) => { /* accept the submission */ }
//!     Err(error) => {
//!         eprintln!("throttled, retry in {}s", error.retry_after().as_secs());
//!     }
//! }
//! ```

mod config;
mod error;
mod limiter;

pub use config::RateLimiterConfig;
pub use error::RateLimitError;
pub use limiter::{BlockedClient, RateLimitStats, RateLimiter, client_hash};
