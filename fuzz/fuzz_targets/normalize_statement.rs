//! Fuzz target for SQL statement normalization.
//!
//! Normalization runs on every captured query, so it must never panic no
//! matter what statement text an executor hands over.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_normalize_statement
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use quotekit_profiler::normalize_statement;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, ignoring invalid UTF-8
    if let Ok(sql) = std::str::from_utf8(data) {
        let normalized = normalize_statement(sql);

        // Normalization is idempotent: a normalized statement has no
        // literals or whitespace runs left to rewrite
        assert_eq!(normalize_statement(&normalized), normalized);
    }
});
