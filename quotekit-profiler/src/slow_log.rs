//! Append-only slow-query file log.

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// File sink for slow queries.
///
/// One line per slow query, appended as it is captured. Writes are
/// synchronous and strictly best-effort: a failing disk must not take the
/// request down with it, so errors are logged at debug level and dropped.
pub struct SlowQueryLog {
    dir: PathBuf,
    file_name: String,
}

impl SlowQueryLog {
    /// Default log file name inside the log directory.
    pub const DEFAULT_FILE_NAME: &'static str = "slow-queries.log";

    /// Create a sink writing into the given directory.
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Use a different file name inside the log directory.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Full path of the log file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Append one entry, swallowing any I/O failure.
    pub fn append(&self, sql: &str, time_ms: f64) {
        if let Err(error) = self.try_append(sql, time_ms) {
            tracing::debug!(
                target: "quotekit::profiler",
                path = %self.path().display(),
                %error,
                "slow-query log write failed"
            );
        }
    }

    fn try_append(&self, sql: &str, time_ms: f64) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let entry = format!(
            "[{}] Query took {:.2}ms: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            time_ms,
            sql
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())?;
        file.write_all(entry.as_bytes())
    }
}
