//! The query profiler core.
//!
//! [`QueryProfiler`] captures one request's worth of executed queries:
//! enable it at request start, feed it every statement as it finishes, and
//! read statistics, reports, or the CSV export at shutdown. Capture state
//! lives behind interior mutability so one profiler can be shared by
//! reference across an executor and its diagnostics surface.

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::pattern::{self, NPlusOneCandidate};
use super::record::{QueryOutcome, QueryRecord};
use super::report::{self, ProfileReport};
use super::slow_log::SlowQueryLog;
use super::stats::QueryStatistics;

/// Configuration for the query profiler.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Queries at or above this many milliseconds are classified slow.
    pub slow_query_threshold_ms: u64,
    /// Directory for the slow-query file log; `None` disables file logging.
    pub slow_log_dir: Option<PathBuf>,
    /// File name inside the log directory.
    pub slow_log_file_name: String,
}

impl ProfilerConfig {
    /// Default slow-query threshold in milliseconds.
    pub const DEFAULT_THRESHOLD_MS: u64 = 100;

    /// Create a config with the default threshold and no file log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slow-query threshold (floored at 1 ms).
    pub fn with_threshold_ms(mut self, ms: u64) -> Self {
        self.slow_query_threshold_ms = ms.max(1);
        self
    }

    /// Write slow queries to a file under the given directory.
    pub fn with_slow_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.slow_log_dir = Some(dir.into());
        self
    }

    /// Use a different file name for the slow-query log.
    pub fn with_slow_log_file_name(mut self, name: impl Into<String>) -> Self {
        self.slow_log_file_name = name.into();
        self
    }
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            slow_query_threshold_ms: Self::DEFAULT_THRESHOLD_MS,
            slow_log_dir: None,
            slow_log_file_name: SlowQueryLog::DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Per-request query capture with slow-query classification.
///
/// All methods take `&self`; the capture sequence, enabled flag, threshold,
/// and session timer sit behind locks and atomics so the profiler can be
/// handed out as a shared handle.
pub struct QueryProfiler {
    enabled: AtomicBool,
    threshold_ms: AtomicU64,
    records: RwLock<Vec<QueryRecord>>,
    started_at: RwLock<Instant>,
    slow_log: Option<SlowQueryLog>,
}

impl QueryProfiler {
    /// Create a disabled profiler with the default config.
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    /// Create a disabled profiler with a custom config.
    pub fn with_config(config: ProfilerConfig) -> Self {
        let slow_log = config
            .slow_log_dir
            .map(|dir| SlowQueryLog::new(dir).with_file_name(config.slow_log_file_name));

        Self {
            enabled: AtomicBool::new(false),
            threshold_ms: AtomicU64::new(config.slow_query_threshold_ms.max(1)),
            records: RwLock::new(Vec::new()),
            started_at: RwLock::new(Instant::now()),
            slow_log,
        }
    }

    /// Start capturing.
    ///
    /// Drops any previously captured records and restarts the session
    /// timer.
    pub fn enable(&self) {
        self.records.write().clear();
        *self.started_at.write() = Instant::now();
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Stop capturing.
    ///
    /// Existing records are kept so reports can still be generated.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Whether queries are currently being captured.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Capture one executed query.
    ///
    /// No-op while disabled. The slow flag is decided against the threshold
    /// in force right now and is never revisited; slow queries additionally
    /// go to the file log when one is configured.
    pub fn log_query(&self, sql: &str, elapsed: Duration, outcome: &QueryOutcome) {
        if !self.is_enabled() {
            return;
        }

        let time_ms = elapsed.as_secs_f64() * 1000.0;
        let is_slow = self.is_slow_query(time_ms);
        let record = QueryRecord::new(sql, elapsed, is_slow, outcome);

        if is_slow {
            if let Some(slow_log) = &self.slow_log {
                slow_log.append(&record.sql, record.time_ms);
            }
        }

        self.records.write().push(record);
    }

    /// Whether an execution time crosses the current threshold.
    pub fn is_slow_query(&self, time_ms: f64) -> bool {
        time_ms >= self.slow_query_threshold() as f64
    }

    /// Set the slow-query threshold, floored at 1 ms.
    ///
    /// Only affects queries logged from now on; records already captured
    /// keep the classification they were given.
    pub fn set_slow_query_threshold(&self, ms: u64) {
        self.threshold_ms.store(ms.max(1), Ordering::Relaxed);
    }

    /// The slow-query threshold in milliseconds.
    pub fn slow_query_threshold(&self) -> u64 {
        self.threshold_ms.load(Ordering::Relaxed)
    }

    /// Number of captured queries.
    pub fn query_count(&self) -> usize {
        self.records.read().len()
    }

    /// The captured queries, in capture order.
    pub fn queries(&self) -> Vec<QueryRecord> {
        self.records.read().clone()
    }

    /// The captured queries classified slow, in capture order.
    pub fn slow_queries(&self) -> Vec<QueryRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.is_slow)
            .cloned()
            .collect()
    }

    /// Drop all captured records and restart the session timer.
    ///
    /// The enabled state is unchanged.
    pub fn clear_logs(&self) {
        self.records.write().clear();
        *self.started_at.write() = Instant::now();
    }

    /// Seconds since the session started (enable or last clear).
    pub fn session_duration(&self) -> f64 {
        self.started_at.read().elapsed().as_secs_f64()
    }

    /// Aggregate statistics over the capture.
    pub fn statistics(&self) -> QueryStatistics {
        QueryStatistics::from_records(&self.records.read())
    }

    /// Scan the capture for repeated statement shapes.
    pub fn identify_n_plus_one(&self) -> Vec<NPlusOneCandidate> {
        pattern::identify_n_plus_one(&self.records.read())
    }

    /// Produce the full session report in one snapshot.
    pub fn generate_report(&self) -> ProfileReport {
        let records = self.records.read();
        ProfileReport {
            enabled: self.is_enabled(),
            duration: self.started_at.read().elapsed().as_secs_f64(),
            statistics: QueryStatistics::from_records(&records),
            n_plus_one_candidates: pattern::identify_n_plus_one(&records),
            queries: records.clone(),
            slow_query_threshold: self.slow_query_threshold(),
        }
    }

    /// Render the capture as CSV.
    pub fn export_to_csv(&self) -> String {
        report::export_to_csv(&self.records.read())
    }

    /// Emit warnings for every slow query captured this session.
    ///
    /// Intended as an end-of-request hook. Emits nothing while disabled or
    /// when no slow queries were captured; otherwise one summary warning
    /// followed by one warning per slow record, in capture order.
    pub fn log_slow_queries(&self) {
        if !self.is_enabled() {
            return;
        }

        let slow = self.slow_queries();
        if slow.is_empty() {
            return;
        }

        let slowest_ms = slow
            .iter()
            .map(|r| r.time_ms)
            .fold(f64::NEG_INFINITY, f64::max);

        tracing::warn!(
            target: "quotekit::profiler",
            count = slow.len(),
            threshold_ms = self.slow_query_threshold(),
            slowest_query_time_ms = slowest_ms,
            "slow queries detected"
        );

        for record in &slow {
            tracing::warn!(
                target: "quotekit::profiler",
                sql = %record.sql,
                time_ms = record.time_ms,
                rows_affected = record.rows_affected,
                last_error = %record.last_error,
                "slow query executed"
            );
        }
    }
}

impl Default for QueryProfiler {
    fn default() -> Self {
        Self::new()
    }
}
