//! Query capture and diagnostics for the QuoteKit quote-request service.
//!
//! [`QueryProfiler`] records every statement a request executes, classifies
//! slow queries against a configurable threshold, and turns the capture
//! into diagnostics:
//!
//! - aggregate [`QueryStatistics`] (totals, averages, worst offenders)
//! - repeated-shape [`NPlusOneCandidate`]s via statement normalization
//! - a serializable [`ProfileReport`] for the whole session
//! - a CSV export and an append-only slow-query file log
//!
//! # Quick Start
//!
//! ```rust
//! use quotekit_profiler::{QueryOutcome, QueryProfiler};
//! use std::time::Duration;
//!
//! let profiler = QueryProfiler::new();
//! profiler.enable();
//!
//! profiler.log_query(
//!     "SELECT * FROM quotes WHERE id = 42",
//!     Duration::from_millis(12),
//!     &QueryOutcome::new().with_rows_affected(1),
//! );
//!
//! println!("{}", profiler.statistics());
//! profiler.log_slow_queries();
//! ```
//!
//! Capture is request-scoped by design: records live in memory, are
//! dropped by `enable()`/`clear_logs()`, and never persist across
//! processes.

mod pattern;
mod profiler;
mod record;
mod report;
mod slow_log;
mod stats;

pub use pattern::{NPlusOneCandidate, identify_n_plus_one, normalize_statement, repeat_likelihood};
pub use profiler::{ProfilerConfig, QueryProfiler};
pub use record::{QueryOutcome, QueryRecord};
pub use report::{ProfileReport, export_to_csv};
pub use slow_log::SlowQueryLog;
pub use stats::QueryStatistics;
