//! # QuoteKit
//!
//! Runtime infrastructure for the QuoteKit quote-request service:
//!
//! - [`cache`] - read-through settings caching with hit/miss accounting
//! - [`profiler`] - per-request query capture, slow-query classification,
//!   and N+1 detection
//! - [`limit`] - sliding-window submission rate limiting
//!
//! ## Quick Start
//!
//! ```rust
//! use quotekit::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // Settings behind a read-through cache
//! let settings = SettingsCache::new(MemoryCache::default(), MemoryStore::new());
//! let slots = settings.get_time_slots().await;
//!
//! // Profile the queries a request executes
//! let profiler = QueryProfiler::new();
//! profiler.enable();
//! profiler.log_query(
//!     "SELECT * FROM quotes WHERE id = 7",
//!     Duration::from_millis(3),
//!     &QueryOutcome::new(),
//! );
//! profiler.log_slow_queries();
//!
//! // Throttle public submissions
//! let limiter = RateLimiter::new(RateLimiterConfig::default());
//! assert!(limiter.check("203.0.113.7").is_ok());
//! # }
//! ```
//!
//! Each subsystem is an ordinary owned value: construct it once at
//! application start and hand shared references to the collaborators that
//! need it. There are no process-wide singletons.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Read-through settings cache.
pub mod cache {
    pub use quotekit_cache::*;
}

/// Query capture and diagnostics.
pub mod profiler {
    pub use quotekit_profiler::*;
}

/// Submission rate limiting.
pub mod limit {
    pub use quotekit_limit::*;
}

pub mod logging;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cache::{
        CacheBackend, CacheMetrics, MemoryCache, MemoryStore, SettingsCache, SettingsCacheConfig,
        SettingsStore,
    };
    pub use crate::limit::{RateLimitError, RateLimiter, RateLimiterConfig};
    pub use crate::profiler::{ProfilerConfig, QueryOutcome, QueryProfiler};
}

// Re-export key types at the crate root
pub use cache::{CacheReport, SettingsCache};
pub use limit::RateLimiter;
pub use profiler::{ProfileReport, QueryProfiler};
