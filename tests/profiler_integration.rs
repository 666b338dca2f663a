//! Integration tests for the query profiler.
//!
//! These tests exercise the published `quotekit` surface end to end:
//! - capture lifecycle (enable/disable/clear)
//! - slow-query classification and the snapshot-at-log-time rule
//! - N+1 detection over normalized statement shapes
//! - statistics, reports, CSV export, and the slow-query file log

use quotekit::profiler::{
    ProfilerConfig, QueryOutcome, QueryProfiler, normalize_statement, repeat_likelihood,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn profiler() -> QueryProfiler {
    let profiler = QueryProfiler::new();
    profiler.enable();
    profiler
}

fn log(profiler: &QueryProfiler, sql: &str, millis: u64) {
    profiler.log_query(sql, Duration::from_millis(millis), &QueryOutcome::new());
}

#[test]
fn test_capture_lifecycle() {
    let profiler = QueryProfiler::new();
    assert!(!profiler.is_enabled());
    log(&profiler, "SELECT 1", 1);
    assert_eq!(profiler.query_count(), 0);

    profiler.enable();
    assert!(profiler.is_enabled());
    log(&profiler, "SELECT 1", 1);
    assert_eq!(profiler.query_count(), 1);

    profiler.disable();
    log(&profiler, "SELECT 2", 1);
    assert_eq!(profiler.query_count(), 1);

    profiler.clear_logs();
    assert_eq!(profiler.query_count(), 0);
    assert!(!profiler.is_enabled());
}

#[test]
fn test_threshold_classification_boundaries() {
    let profiler = profiler();
    assert_eq!(profiler.slow_query_threshold(), 100);

    // 150ms >= 100ms threshold, 50ms below it, 100ms exactly on it
    log(&profiler, "slow", 150);
    log(&profiler, "fast", 50);
    log(&profiler, "edge", 100);

    let queries = profiler.queries();
    assert!(queries[0].is_slow);
    assert!(!queries[1].is_slow);
    assert!(queries[2].is_slow);

    assert_eq!(queries[0].time, 0.15);
    assert_eq!(queries[0].time_ms, 150.0);
}

#[test]
fn test_is_slow_is_a_snapshot() {
    let profiler = profiler();
    log(&profiler, "SELECT 1", 50);

    profiler.set_slow_query_threshold(25);

    // The stored record keeps its original classification
    assert!(!profiler.queries()[0].is_slow);
    assert_eq!(profiler.statistics().slow_queries, 0);

    log(&profiler, "SELECT 2", 50);
    assert!(profiler.queries()[1].is_slow);
}

#[test]
fn test_threshold_floor() {
    let profiler = profiler();
    profiler.set_slow_query_threshold(0);
    assert_eq!(profiler.slow_query_threshold(), 1);
}

#[test]
fn test_empty_statistics() {
    let profiler = profiler();
    let stats = profiler.statistics();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.total_time, 0.0);
    assert_eq!(stats.avg_time, 0.0);
    assert_eq!(stats.slow_queries, 0);
    assert_eq!(stats.slowest_query, None);
    assert!(stats.slow_queries_list.is_empty());
}

#[test]
fn test_statistics_aggregation() {
    let profiler = profiler();
    log(&profiler, "a", 10);
    log(&profiler, "b", 20);
    log(&profiler, "c", 300);

    let stats = profiler.statistics();
    assert_eq!(stats.total, 3);
    assert!((stats.total_time_ms - 330.0).abs() < 1e-6);
    assert!((stats.avg_time_ms - 110.0).abs() < 1e-6);
    assert_eq!(stats.slow_queries, 1);
    assert_eq!(stats.slowest_query.unwrap().sql, "c");
}

#[test]
fn test_slow_list_ranked_worst_first() {
    let profiler = profiler();
    log(&profiler, "mild", 150);
    log(&profiler, "worst", 900);
    log(&profiler, "bad", 400);

    let stats = profiler.statistics();
    let order: Vec<&str> = stats
        .slow_queries_list
        .iter()
        .map(|r| r.sql.as_str())
        .collect();
    assert_eq!(order, vec!["worst", "bad", "mild"]);
}

#[test]
fn test_normalization_property() {
    assert_eq!(
        normalize_statement("SELECT * FROM t WHERE id = 1"),
        "SELECT * FROM t WHERE id = ?"
    );
    assert_eq!(
        normalize_statement("SELECT * FROM t   WHERE name = 'alice'"),
        "SELECT * FROM t WHERE name = ?"
    );
}

#[test]
fn test_n_plus_one_three_repeats() {
    let profiler = profiler();
    log(&profiler, "SELECT * FROM t WHERE id = 1", 2);
    log(&profiler, "SELECT * FROM t WHERE id = 2", 2);
    log(&profiler, "SELECT * FROM t WHERE id = 3", 2);

    let candidates = profiler.identify_n_plus_one();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].pattern, "SELECT * FROM t WHERE id = ?");
    assert_eq!(candidates[0].count, 3);
    assert_eq!(candidates[0].likelihood, 0.3);
    assert_eq!(candidates[0].indices, vec![0, 1, 2]);
}

#[test]
fn test_n_plus_one_needs_three() {
    let profiler = profiler();
    log(&profiler, "SELECT * FROM t WHERE id = 1", 2);
    log(&profiler, "SELECT * FROM t WHERE id = 2", 2);

    assert!(profiler.identify_n_plus_one().is_empty());
    assert_eq!(repeat_likelihood(2), 0.0);
    assert_eq!(repeat_likelihood(10), 1.0);
}

#[test]
fn test_report_bundle() {
    let profiler = profiler();
    for i in 0..4 {
        log(&profiler, &format!("SELECT * FROM q WHERE id = {i}"), 120);
    }

    let report = profiler.generate_report();
    assert!(report.enabled);
    assert!(report.duration >= 0.0);
    assert_eq!(report.statistics.total, 4);
    assert_eq!(report.statistics.slow_queries, 4);
    assert_eq!(report.n_plus_one_candidates[0].count, 4);
    assert_eq!(report.queries.len(), 4);
    assert_eq!(report.slow_query_threshold, 100);

    // The report serializes as one JSON document
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["statistics"]["total"], 4);
}

#[test]
fn test_csv_export_format() {
    let profiler = profiler();
    profiler.log_query(
        "SELECT 1",
        Duration::from_micros(12_345),
        &QueryOutcome::new().with_rows_affected(1),
    );

    let csv = profiler.export_to_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "\"Query Index\",\"SQL Query\",\"Time (ms)\",\"Is Slow\",\"Rows Affected\",\"Last Error\""
    );
    assert_eq!(lines[1], "\"0\",\"SELECT 1\",\"12.35\",\"No\",\"1\",\"\"");
}

#[test]
fn test_csv_quote_escaping() {
    let profiler = profiler();
    log(&profiler, r#"SELECT "name" FROM users"#, 5);

    let csv = profiler.export_to_csv();
    assert!(csv.contains(r#""SELECT ""name"" FROM users""#));
}

#[test]
fn test_slow_query_file_log() {
    let tmp = tempfile::tempdir().unwrap();
    let profiler = QueryProfiler::with_config(
        ProfilerConfig::new()
            .with_slow_log_dir(tmp.path().join("logs"))
            .with_threshold_ms(50),
    );
    profiler.enable();

    log(&profiler, "SELECT * FROM big_table", 80);
    log(&profiler, "SELECT 1", 1);

    let contents =
        std::fs::read_to_string(tmp.path().join("logs").join("slow-queries.log")).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("Query took 80.00ms: SELECT * FROM big_table"));
}

#[test]
fn test_outcome_fields_surface_everywhere() {
    let profiler = profiler();
    profiler.log_query(
        "UPDATE quotes SET status = 'sent'",
        Duration::from_millis(200),
        &QueryOutcome::new()
            .with_rows_affected(12)
            .with_error("lock wait timeout"),
    );

    let record = &profiler.slow_queries()[0];
    assert_eq!(record.rows_affected, 12);
    assert_eq!(record.last_error, "lock wait timeout");

    let csv = profiler.export_to_csv();
    assert!(csv.contains("\"12\",\"lock wait timeout\""));
}

#[test]
fn test_log_slow_queries_hook_is_safe() {
    // No captures, disabled, and nothing-slow paths must all be no-ops
    let profiler = QueryProfiler::new();
    profiler.log_slow_queries();

    profiler.enable();
    profiler.log_slow_queries();

    log(&profiler, "SELECT 1", 1);
    profiler.log_slow_queries();

    log(&profiler, "SELECT 2", 500);
    profiler.log_slow_queries();
}
