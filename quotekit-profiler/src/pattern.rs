//! Statement shape normalization and N+1 detection.
//!
//! An N+1 burst shows up as the same statement shape executed over and
//! over with different literals. Normalization strips the literals so the
//! shapes collapse into one pattern, then repeat counts are scored.

use indexmap::IndexMap;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::record::QueryRecord;

/// Repeats of one shape required before it is flagged.
const MIN_REPEAT_COUNT: usize = 3;
/// Candidates returned per scan.
const MAX_CANDIDATES: usize = 10;

fn integer_literals() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d+\b").unwrap())
}

fn single_quoted() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"'[^']*'").unwrap())
}

fn double_quoted() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""[^"]*""#).unwrap())
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Reduce a statement to its shape.
///
/// Integer literals and quoted strings become `?`, whitespace runs
/// collapse to single spaces, and the result is trimmed. Two executions of
/// the same query with different bound values normalize identically.
pub fn normalize_statement(sql: &str) -> String {
    let pattern = integer_literals().replace_all(sql, "?");
    let pattern = single_quoted().replace_all(&pattern, "?");
    let pattern = double_quoted().replace_all(&pattern, "?");
    let pattern = whitespace_runs().replace_all(&pattern, " ");
    pattern.trim().to_string()
}

/// Score how likely a repeat count is an N+1 burst.
///
/// Below [`MIN_REPEAT_COUNT`] the score is 0.0; from there it grows
/// linearly with the count and saturates at 1.0 (ten repeats).
pub fn repeat_likelihood(count: usize) -> f64 {
    if count < MIN_REPEAT_COUNT {
        return 0.0;
    }

    (count as f64 / 10.0).min(1.0)
}

/// One repeated statement shape flagged as a possible N+1 burst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NPlusOneCandidate {
    /// The normalized statement shape.
    pub pattern: String,
    /// How many captured queries share the shape.
    pub count: usize,
    /// Average execution time across the group, in milliseconds.
    pub avg_time_ms: f64,
    /// Total execution time across the group, in milliseconds.
    pub total_time_ms: f64,
    /// Positions of the group's queries in the capture sequence.
    pub indices: Vec<usize>,
    /// Likelihood score (0.0 - 1.0).
    pub likelihood: f64,
}

/// Scan captured records for repeated statement shapes.
///
/// Groups preserve first-seen order, so equal likelihoods keep the order
/// the shapes first appeared in. At most [`MAX_CANDIDATES`] candidates are
/// returned, most likely first.
pub fn identify_n_plus_one(records: &[QueryRecord]) -> Vec<NPlusOneCandidate> {
    struct Group {
        total_time: f64,
        indices: Vec<usize>,
    }

    let mut groups: IndexMap<String, Group> = IndexMap::new();

    for (index, record) in records.iter().enumerate() {
        let pattern = normalize_statement(&record.sql);
        let group = groups.entry(pattern).or_insert_with(|| Group {
            total_time: 0.0,
            indices: Vec::new(),
        });
        group.total_time += record.time;
        group.indices.push(index);
    }

    let mut candidates: Vec<NPlusOneCandidate> = groups
        .into_iter()
        .filter(|(_, group)| group.indices.len() >= MIN_REPEAT_COUNT)
        .map(|(pattern, group)| {
            let count = group.indices.len();
            let avg_time = group.total_time / count as f64;
            NPlusOneCandidate {
                pattern,
                count,
                avg_time_ms: avg_time * 1000.0,
                total_time_ms: group.total_time * 1000.0,
                indices: group.indices,
                likelihood: repeat_likelihood(count),
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.likelihood.total_cmp(&a.likelihood));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}
