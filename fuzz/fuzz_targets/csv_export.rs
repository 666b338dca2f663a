//! Structured fuzzing for the CSV exporter.
//!
//! Generates arbitrary capture sequences and checks that the export never
//! panics and always stays well-formed RFC 4180.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_csv_export
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quotekit_profiler::{QueryRecord, export_to_csv};

/// A generated capture entry.
#[derive(Debug, Arbitrary)]
struct FuzzRecord {
    sql: String,
    time_ms: f64,
    is_slow: bool,
    rows_affected: u64,
    last_error: String,
}

impl FuzzRecord {
    fn into_record(self) -> QueryRecord {
        QueryRecord {
            sql: self.sql,
            time: self.time_ms / 1000.0,
            time_ms: self.time_ms,
            is_slow: self.is_slow,
            rows_affected: self.rows_affected,
            last_error: self.last_error,
        }
    }
}

fuzz_target!(|records: Vec<FuzzRecord>| {
    let count = records.len();
    let records: Vec<QueryRecord> = records.into_iter().map(FuzzRecord::into_record).collect();

    let csv = export_to_csv(&records);

    // Header plus one row per record; unescaped field text may contain
    // newlines, so count rows by unquoted line breaks
    let mut rows = 0usize;
    let mut in_quotes = false;
    for ch in csv.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => rows += 1,
            _ => {}
        }
    }
    assert_eq!(rows, count + 1);

    // Quotes balance out when every embedded quote is doubled
    assert!(!in_quotes);
});
