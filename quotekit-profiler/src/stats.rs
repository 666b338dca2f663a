//! Aggregated statistics over captured queries.

use serde::{Deserialize, Serialize};

use super::record::QueryRecord;

/// How many slow queries the statistics carry in full.
const TOP_SLOW_QUERIES: usize = 10;

/// Aggregates computed over one capture session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryStatistics {
    /// Number of captured queries.
    pub total: usize,
    /// Summed execution time in seconds.
    pub total_time: f64,
    /// Summed execution time in milliseconds.
    pub total_time_ms: f64,
    /// Average execution time in seconds.
    pub avg_time: f64,
    /// Average execution time in milliseconds.
    pub avg_time_ms: f64,
    /// Number of queries classified slow at log time.
    pub slow_queries: usize,
    /// The slowest slow query, if any query was slow.
    pub slowest_query: Option<QueryRecord>,
    /// The slowest queries, worst first, at most ten.
    pub slow_queries_list: Vec<QueryRecord>,
}

impl QueryStatistics {
    /// Compute statistics over a capture sequence.
    ///
    /// An empty capture yields all-zero aggregates and no slowest query.
    pub fn from_records(records: &[QueryRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total = records.len();
        let total_time: f64 = records.iter().map(|r| r.time).sum();
        let avg_time = total_time / total as f64;

        let mut slow: Vec<QueryRecord> =
            records.iter().filter(|r| r.is_slow).cloned().collect();
        slow.sort_by(|a, b| b.time_ms.total_cmp(&a.time_ms));

        let slow_count = slow.len();
        let slowest_query = slow.first().cloned();
        slow.truncate(TOP_SLOW_QUERIES);

        Self {
            total,
            total_time,
            total_time_ms: total_time * 1000.0,
            avg_time,
            avg_time_ms: avg_time * 1000.0,
            slow_queries: slow_count,
            slowest_query,
            slow_queries_list: slow,
        }
    }

    /// Format as a human-readable string.
    pub fn summary(&self) -> String {
        format!(
            "{} queries in {:.2}ms ({} slow, avg {:.2}ms)",
            self.total, self.total_time_ms, self.slow_queries, self.avg_time_ms
        )
    }
}

impl std::fmt::Display for QueryStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}
