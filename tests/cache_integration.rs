//! Integration tests for the settings cache facade.
//!
//! These tests exercise the published `quotekit` surface end to end:
//! - read-through hit/miss/set accounting
//! - the disabled-cache bypass path
//! - composite getters and stringly-typed store coercion
//! - clearing (enumerated keys vs. whole group) and counter resets
//! - hit-rate edge cases

use quotekit::cache::{
    CacheBackend, CacheStats, MemoryCache, MemoryStore, NoopCache, QuoteSettings, SettingsCache,
    SettingsCacheConfig,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

fn cache() -> SettingsCache<MemoryCache, MemoryStore> {
    SettingsCache::new(MemoryCache::default(), MemoryStore::new())
}

#[tokio::test]
async fn test_miss_reads_store_then_hit_reads_cache() {
    let cache = cache();
    cache.store().insert("quote_prefix", json!("INV"));

    assert_eq!(cache.get("quote_prefix", json!("Q")).await, json!("INV"));
    assert_eq!(cache.get("quote_prefix", json!("Q")).await, json!("INV"));

    let stats = cache.metrics().snapshot();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.sets, 1);
}

#[tokio::test]
async fn test_hits_plus_misses_equals_read_attempts() {
    let cache = cache();

    for i in 0..7 {
        cache.get(&format!("key_{}", i % 3), json!(i)).await;
    }

    let stats = cache.metrics().snapshot();
    assert_eq!(stats.hits + stats.misses, 7);
    assert_eq!(stats.total_requests(), 7);
}

#[tokio::test]
async fn test_disabled_cache_never_contacts_backend() {
    let cache = SettingsCache::with_config(
        MemoryCache::default(),
        MemoryStore::new(),
        SettingsCacheConfig::default().with_enabled(false),
    );
    cache.store().insert("admin_email", json!("ops@example.com"));

    assert!(!cache.is_enabled());
    for _ in 0..5 {
        let value = cache.get("admin_email", json!("")).await;
        assert_eq!(value, json!("ops@example.com"));
    }

    // Nothing cached, no counters moved
    assert_eq!(cache.backend().len().await.unwrap(), 0);
    assert_eq!(cache.metrics().snapshot(), CacheStats::default());
}

#[tokio::test]
async fn test_unavailable_backend_reports_disabled() {
    let cache = SettingsCache::new(NoopCache, MemoryStore::new());

    assert!(cache.config().enabled);
    assert!(!cache.is_enabled());

    let report = cache.statistics();
    assert!(report.enabled);
    assert!(!report.backend_available);
}

#[tokio::test]
async fn test_set_then_get_is_a_hit() {
    let cache = cache();

    assert!(cache.set("banner", &"maintenance", None).await);
    let value = cache.get("banner", json!("none")).await;

    assert_eq!(value, json!("maintenance"));
    let stats = cache.metrics().snapshot();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 0);
}

#[tokio::test]
async fn test_delete_forces_next_read_to_miss() {
    let cache = cache();
    cache.set("banner", &"maintenance", None).await;

    assert!(cache.delete("banner").await);
    cache.get("banner", json!("none")).await;

    let stats = cache.metrics().snapshot();
    assert_eq!(stats.deletes, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_expired_entry_misses() {
    let cache = SettingsCache::with_config(
        MemoryCache::default(),
        MemoryStore::new(),
        SettingsCacheConfig::default().with_ttl(Duration::from_millis(10)),
    );
    cache.store().insert("quote_prefix", json!("INV"));

    cache.get("quote_prefix", json!("Q")).await;
    tokio::time::sleep(Duration::from_millis(30)).await;
    cache.get("quote_prefix", json!("Q")).await;

    let stats = cache.metrics().snapshot();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 0);
}

#[tokio::test]
async fn test_composite_settings_round_trip() {
    let cache = cache();
    cache.store().insert("quote_prefix", json!("INV"));
    cache.store().insert("quote_start_number", json!("5000"));
    cache.store().insert("admin_email", json!("ops@example.com"));

    let settings = cache.get_settings().await;
    assert_eq!(settings.quote_prefix, "INV");
    assert_eq!(settings.quote_start_number, "5000");
    assert_eq!(settings.admin_email, "ops@example.com");
    // Unset fields keep their defaults
    assert!(settings.send_to_admin);
    assert_eq!(settings.meeting_duration, 60);

    // One composite read = one counter movement
    let stats = cache.metrics().snapshot();
    assert_eq!((stats.hits, stats.misses), (0, 1));
    assert_eq!(cache.get_settings().await, settings);
    assert_eq!(cache.metrics().snapshot().hits, 1);
}

#[tokio::test]
async fn test_stringly_typed_store_values_coerced() {
    let cache = cache();
    cache.store().insert("send_to_client", json!("no"));
    cache.store().insert("enable_pdf", json!("1"));
    cache.store().insert("meeting_duration", json!("45"));

    let settings = cache.get_settings().await;
    assert!(!settings.send_to_client);
    assert!(settings.enable_pdf);
    assert_eq!(settings.meeting_duration, 45);
}

#[tokio::test]
async fn test_typed_getters_coerce_at_the_boundary() {
    let cache = cache();
    cache.store().insert("auto_create_event", json!("yes"));
    cache.store().insert("quote_start_number", json!("1001"));

    assert!(cache.get_bool("auto_create_event", false).await);
    assert_eq!(cache.get_u64("quote_start_number", 1).await, 1001);
    assert_eq!(cache.get_string("missing", "fallback").await, "fallback");
}

#[tokio::test]
async fn test_time_slots_default_when_unset() {
    let cache = cache();
    assert_eq!(
        cache.get_time_slots().await,
        vec!["09:00", "11:00", "14:00", "16:00"]
    );
}

#[tokio::test]
async fn test_google_config_defaults() {
    let cache = cache();
    let config = cache.get_google_config().await;

    assert!(!config.connected);
    assert_eq!(config.calendar_id, "primary");
    assert_eq!(config.token_expires, 0);
}

#[tokio::test]
async fn test_clear_settings_cache_drops_enumerated_keys_only() {
    let cache = cache();
    cache.warm_cache().await;
    cache.set("unrelated", &"survives", None).await;

    cache.clear_settings_cache().await;

    // Ten enumerated deletes, the unrelated entry survives
    assert_eq!(cache.metrics().snapshot().deletes, 10);
    assert_eq!(cache.get("unrelated", json!("gone")).await, json!("survives"));
}

#[tokio::test]
async fn test_clear_all_cache_zeroes_every_counter() {
    let cache = cache();
    cache.warm_cache().await;
    cache.set("extra", &1, None).await;
    cache.delete("extra").await;
    assert_ne!(cache.metrics().snapshot(), CacheStats::default());

    cache.clear_all_cache().await;

    let report = cache.statistics();
    assert_eq!(report.stats, CacheStats::default());
    assert_eq!(report.hit_rate, 0.0);
    assert_eq!(report.total_requests, 0);
}

#[tokio::test]
async fn test_warm_cache_is_noop_when_disabled() {
    let cache = SettingsCache::new(NoopCache, MemoryStore::new());
    cache.warm_cache().await;
    assert_eq!(cache.metrics().snapshot(), CacheStats::default());
}

#[tokio::test]
async fn test_hit_rate_zero_without_traffic() {
    let cache = cache();
    assert_eq!(cache.statistics().hit_rate, 0.0);
}

#[tokio::test]
async fn test_hit_rate_hundred_for_all_hits() {
    let cache = cache();
    cache.set("banner", &"up", None).await;

    for _ in 0..4 {
        cache.get("banner", json!("down")).await;
    }

    let report = cache.statistics();
    assert_eq!(report.hit_rate, 100.0);
    assert_eq!(report.total_requests, 4);
}

#[tokio::test]
async fn test_shared_metrics_between_caches() {
    use quotekit::cache::CacheMetrics;
    use std::sync::Arc;

    let metrics = Arc::new(CacheMetrics::new());
    let a = SettingsCache::with_metrics(
        MemoryCache::default(),
        MemoryStore::new(),
        SettingsCacheConfig::default(),
        Arc::clone(&metrics),
    );
    let b = SettingsCache::with_metrics(
        MemoryCache::default(),
        MemoryStore::new(),
        SettingsCacheConfig::default(),
        Arc::clone(&metrics),
    );

    a.get("k", json!(1)).await;
    b.get("k", json!(2)).await;

    assert_eq!(metrics.snapshot().misses, 2);
}

#[tokio::test]
async fn test_report_display_is_one_line() {
    let cache = cache();
    cache.get("k", json!(1)).await;

    let line = cache.statistics().to_string();
    assert!(!line.contains('\n'));
    assert!(line.contains("hit rate"));
}

#[tokio::test]
async fn test_default_settings_struct() {
    let defaults = QuoteSettings::default();
    assert_eq!(defaults.quote_prefix, "Q");
    assert_eq!(defaults.quote_start_number, "1001");
    assert!(defaults.send_to_admin);
    assert!(!defaults.enable_pdf);
}
