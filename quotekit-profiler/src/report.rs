//! Session reports and CSV export.

use serde::{Deserialize, Serialize};

use super::pattern::NPlusOneCandidate;
use super::record::QueryRecord;
use super::stats::QueryStatistics;

/// Everything a profiling session produced, in one serializable bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Whether capture was switched on when the report was generated.
    pub enabled: bool,
    /// Seconds since the session started (enable or last clear).
    pub duration: f64,
    /// Aggregated statistics.
    pub statistics: QueryStatistics,
    /// Repeated-shape candidates, most likely first.
    pub n_plus_one_candidates: Vec<NPlusOneCandidate>,
    /// The full capture sequence.
    pub queries: Vec<QueryRecord>,
    /// Slow-query threshold in force, in milliseconds.
    pub slow_query_threshold: u64,
}

impl ProfileReport {
    /// Format as a human-readable string.
    pub fn summary(&self) -> String {
        format!(
            "{} queries over {:.2}s, {} slow (threshold {}ms), {} repeated-shape candidates",
            self.statistics.total,
            self.duration,
            self.statistics.slow_queries,
            self.slow_query_threshold,
            self.n_plus_one_candidates.len(),
        )
    }
}

impl std::fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

const CSV_HEADER: [&str; 6] = [
    "Query Index",
    "SQL Query",
    "Time (ms)",
    "Is Slow",
    "Rows Affected",
    "Last Error",
];

/// Quote one CSV field, doubling embedded quotes (RFC 4180).
fn csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv_row<S: AsRef<str>>(fields: impl IntoIterator<Item = S>) -> String {
    let mut row = fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Render captured queries as CSV.
///
/// Every field is quoted; times carry two decimals and the slow flag
/// renders as `Yes`/`No`. Rows appear in capture order, one header line
/// first.
pub fn export_to_csv(records: &[QueryRecord]) -> String {
    let mut out = csv_row(CSV_HEADER);

    for (index, record) in records.iter().enumerate() {
        out.push_str(&csv_row([
            index.to_string(),
            record.sql.clone(),
            format!("{:.2}", record.time_ms),
            if record.is_slow { "Yes" } else { "No" }.to_string(),
            record.rows_affected.to_string(),
            record.last_error.clone(),
        ]));
    }

    out
}
