//! Cache statistics and metrics.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe cache metrics collector.
///
/// The collector is owned by whoever constructs the cache and is shared by
/// `Arc`, so callers can observe and reset counters independently of the
/// cache itself.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
}

impl CacheMetrics {
    /// Create a new metrics collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit.
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss.
    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful cache write.
    #[inline]
    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delete operation.
    #[inline]
    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of the current counters.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.sets.store(0, Ordering::Relaxed);
        self.deletes.store(0, Ordering::Relaxed);
    }
}

/// A snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of successful write operations.
    pub sets: u64,
    /// Number of delete operations.
    pub deletes: u64,
}

impl CacheStats {
    /// Total number of read requests that went through the cache.
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate as a percentage (0.0 - 100.0).
    ///
    /// Returns 0.0 when no reads have been recorded.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        (self.hits as f64 / total as f64) * 100.0
    }
}

/// A full statistics report from the settings cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheReport {
    /// Whether caching is switched on.
    pub enabled: bool,
    /// Whether the fast backend reports itself available.
    pub backend_available: bool,
    /// The cache group all entries live in.
    pub group: String,
    /// Counter snapshot.
    pub stats: CacheStats,
    /// Hit rate as a percentage (0.0 - 100.0).
    pub hit_rate: f64,
    /// Total reads served through the cache (hits + misses).
    pub total_requests: u64,
}

impl CacheReport {
    /// Format as a human-readable string.
    pub fn summary(&self) -> String {
        format!(
            "Cache [{}]: {} hits, {} misses ({:.1}% hit rate), {} sets, {} deletes",
            if self.enabled { "on" } else { "off" },
            self.stats.hits,
            self.stats.misses,
            self.hit_rate,
            self.stats.sets,
            self.stats.deletes,
        )
    }
}

impl std::fmt::Display for CacheReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = CacheMetrics::new();

        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_set();

        let stats = metrics.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.deletes, 0);
        assert!((stats.hit_rate() - 66.666).abs() < 0.01);
        assert_eq!(stats.total_requests(), 3);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = CacheMetrics::new();
        metrics.record_hit();
        metrics.record_delete();

        metrics.reset();

        assert_eq!(metrics.snapshot(), CacheStats::default());
    }

    #[test]
    fn test_hit_rate_no_traffic() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let stats = CacheStats {
            hits: 7,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 100.0);
    }

    #[test]
    fn test_report_summary() {
        let report = CacheReport {
            enabled: true,
            backend_available: true,
            group: "quotekit_settings".into(),
            stats: CacheStats {
                hits: 9,
                misses: 1,
                sets: 1,
                deletes: 0,
            },
            hit_rate: 90.0,
            total_requests: 10,
        };
        assert!(report.summary().contains("90.0% hit rate"));
    }
}
