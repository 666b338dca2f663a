//! Captured query records.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Executor-side facts about a finished query.
///
/// The profiler only sees the statement and how long it ran; row counts and
/// error text come from whoever executed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Rows touched by the statement.
    pub rows_affected: u64,
    /// Error text reported by the executor, empty when the query succeeded.
    pub last_error: String,
}

impl QueryOutcome {
    /// An outcome with no rows and no error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the affected row count.
    pub fn with_rows_affected(mut self, rows: u64) -> Self {
        self.rows_affected = rows;
        self
    }

    /// Set the executor error text.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.last_error = error.into();
        self
    }
}

/// One captured query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// The SQL text as executed.
    pub sql: String,
    /// Execution time in seconds.
    pub time: f64,
    /// Execution time in milliseconds.
    pub time_ms: f64,
    /// Whether the query was slow *at the time it was logged*.
    ///
    /// Classified against the threshold in force when the record was made;
    /// changing the threshold later never reclassifies existing records.
    pub is_slow: bool,
    /// Rows touched by the statement.
    pub rows_affected: u64,
    /// Executor error text, empty on success.
    pub last_error: String,
}

impl QueryRecord {
    /// Build a record from the raw capture inputs.
    pub(crate) fn new(
        sql: impl Into<String>,
        elapsed: Duration,
        is_slow: bool,
        outcome: &QueryOutcome,
    ) -> Self {
        let time = elapsed.as_secs_f64();
        Self {
            sql: sql.into(),
            time,
            time_ms: time * 1000.0,
            is_slow,
            rows_affected: outcome.rows_affected,
            last_error: outcome.last_error.clone(),
        }
    }
}
