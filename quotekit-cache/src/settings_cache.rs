//! The settings cache facade.
//!
//! [`SettingsCache`] is the read-through layer between callers and the
//! durable settings store: reads try the fast backend first, fall back to
//! the store, and refill the backend on the way out. A single runtime flag
//! (plus backend availability) collapses the whole thing into direct store
//! reads, so callers never branch on whether caching is on.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::backend::CacheBackend;
use super::key::CacheKey;
use super::settings::{DEFAULT_TIME_SLOTS, GoogleCalendarConfig, QuoteSettings, coerce};
use super::stats::{CacheMetrics, CacheReport};
use super::store::SettingsStore;

/// Setting names as they appear in the durable store (unprefixed).
mod keys {
    pub const SETTINGS: &str = "settings";
    pub const TIME_SLOTS: &str = "time_slots";
    pub const GOOGLE_CONFIG: &str = "google_config";
    pub const QUOTE_PREFIX: &str = "quote_prefix";
    pub const QUOTE_START_NUMBER: &str = "quote_start_number";
    pub const ADMIN_EMAIL: &str = "admin_email";
    pub const EMAIL_SUBJECT_ADMIN: &str = "email_subject_admin";
    pub const EMAIL_SUBJECT_CLIENT: &str = "email_subject_client";
    pub const SEND_TO_ADMIN: &str = "send_to_admin";
    pub const SEND_TO_CLIENT: &str = "send_to_client";
    pub const ENABLE_PDF: &str = "enable_pdf";
    pub const MEETING_DURATION: &str = "meeting_duration";
    pub const AUTO_CREATE_EVENT: &str = "auto_create_event";
    pub const GOOGLE_CLIENT_ID: &str = "google_client_id";
    pub const GOOGLE_CLIENT_SECRET: &str = "google_client_secret";
    pub const GOOGLE_CONNECTED: &str = "google_connected";
    pub const GOOGLE_ACCESS_TOKEN: &str = "google_access_token";
    pub const GOOGLE_REFRESH_TOKEN: &str = "google_refresh_token";
    pub const GOOGLE_TOKEN_EXPIRES: &str = "google_token_expires";
    pub const GOOGLE_CALENDAR_ID: &str = "google_calendar_id";
}

/// The cache entries dropped by [`SettingsCache::clear_settings_cache`].
const SETTINGS_CACHE_KEYS: [&str; 10] = [
    keys::SETTINGS,
    keys::TIME_SLOTS,
    keys::GOOGLE_CONFIG,
    keys::QUOTE_PREFIX,
    keys::QUOTE_START_NUMBER,
    keys::ADMIN_EMAIL,
    keys::EMAIL_SUBJECT_ADMIN,
    keys::EMAIL_SUBJECT_CLIENT,
    keys::SEND_TO_ADMIN,
    keys::SEND_TO_CLIENT,
];

/// Configuration for the settings cache.
#[derive(Debug, Clone)]
pub struct SettingsCacheConfig {
    /// Whether the fast layer is used at all.
    pub enabled: bool,
    /// Prefix prepended to every cache entry name.
    pub prefix: String,
    /// Cache group all entries live in.
    pub group: String,
    /// Time-to-live applied to cached entries.
    pub default_ttl: Duration,
}

impl SettingsCacheConfig {
    /// Default entry time-to-live.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    /// Create a config with default prefix, group, and TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the fast layer on or off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the entry name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the cache group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the entry time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

impl Default for SettingsCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "quotekit_".to_string(),
            group: "quotekit_settings".to_string(),
            default_ttl: Self::DEFAULT_TTL,
        }
    }
}

/// Read-through settings cache.
///
/// This is the primary entry point for settings access. It wraps any
/// [`CacheBackend`] and [`SettingsStore`] pair; both are injected at
/// construction, as is the [`CacheMetrics`] collector when counters need
/// to be shared with a diagnostics surface.
#[derive(Clone)]
pub struct SettingsCache<B: CacheBackend, S: SettingsStore> {
    backend: Arc<B>,
    store: Arc<S>,
    config: SettingsCacheConfig,
    metrics: Arc<CacheMetrics>,
}

impl<B: CacheBackend, S: SettingsStore> SettingsCache<B, S> {
    /// Create a new settings cache with the default config.
    pub fn new(backend: B, store: S) -> Self {
        Self::with_config(backend, store, SettingsCacheConfig::default())
    }

    /// Create with a custom config.
    pub fn with_config(backend: B, store: S, config: SettingsCacheConfig) -> Self {
        Self::with_metrics(backend, store, config, Arc::new(CacheMetrics::new()))
    }

    /// Create with a caller-owned metrics collector.
    pub fn with_metrics(
        backend: B,
        store: S,
        config: SettingsCacheConfig,
        metrics: Arc<CacheMetrics>,
    ) -> Self {
        Self {
            backend: Arc::new(backend),
            store: Arc::new(store),
            config,
            metrics,
        }
    }

    /// Get the cache backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the metrics collector.
    pub fn metrics(&self) -> &Arc<CacheMetrics> {
        &self.metrics
    }

    /// Get the config.
    pub fn config(&self) -> &SettingsCacheConfig {
        &self.config
    }

    /// Whether reads actually go through the fast layer.
    ///
    /// True only when caching is switched on *and* the backend reports
    /// itself available.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.backend.is_available()
    }

    fn cache_key(&self, name: &str) -> CacheKey {
        CacheKey::new(
            self.config.group.clone(),
            format!("{}{}", self.config.prefix, name),
        )
    }

    /// Get a setting with read-through caching.
    ///
    /// Disabled caches read the store directly without touching counters;
    /// enabled caches count a hit or a miss per call, and a set when the
    /// backfill write succeeds. Store failures degrade to `default` - a
    /// settings read never fails the request that triggered it.
    pub async fn get(&self, key: &str, default: Value) -> Value {
        if !self.is_enabled() {
            return self.store_read(key, default).await;
        }

        self.read_through(key, || self.store_read(key, default))
            .await
    }

    /// Get a setting coerced to a bool.
    pub async fn get_bool(&self, key: &str, default: bool) -> bool {
        let value = self.get(key, Value::Bool(default)).await;
        coerce::as_bool(&value, default)
    }

    /// Get a setting coerced to a u64.
    pub async fn get_u64(&self, key: &str, default: u64) -> u64 {
        let value = self.get(key, Value::from(default)).await;
        coerce::as_u64(&value, default)
    }

    /// Get a setting coerced to an i64.
    pub async fn get_i64(&self, key: &str, default: i64) -> i64 {
        let value = self.get(key, Value::from(default)).await;
        coerce::as_i64(&value, default)
    }

    /// Get a setting coerced to a string.
    pub async fn get_string(&self, key: &str, default: &str) -> String {
        let value = self.get(key, Value::from(default)).await;
        coerce::as_string(&value, default)
    }

    /// Cache a value under the given setting name.
    ///
    /// Returns whether the write succeeded; failures are absorbed after a
    /// debug log and only successful writes move the set counter.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> bool
    where
        T: serde::Serialize + Sync,
    {
        let cache_key = self.cache_key(key);
        let ttl = ttl.unwrap_or(self.config.default_ttl);

        match self.backend.set(&cache_key, value, ttl).await {
            Ok(()) => {
                self.metrics.record_set();
                true
            }
            Err(error) => {
                tracing::debug!(
                    target: "quotekit::cache",
                    key = %cache_key,
                    %error,
                    "cache write failed"
                );
                false
            }
        }
    }

    /// Drop a cached setting.
    ///
    /// Returns whether the entry existed; only then does the delete counter
    /// move.
    pub async fn delete(&self, key: &str) -> bool {
        let cache_key = self.cache_key(key);

        match self.backend.delete(&cache_key).await {
            Ok(true) => {
                self.metrics.record_delete();
                true
            }
            Ok(false) => false,
            Err(error) => {
                tracing::debug!(
                    target: "quotekit::cache",
                    key = %cache_key,
                    %error,
                    "cache delete failed"
                );
                false
            }
        }
    }

    /// Get the quote-handling settings as one cached unit.
    pub async fn get_settings(&self) -> QuoteSettings {
        if !self.is_enabled() {
            return self.load_settings().await;
        }

        self.read_through(keys::SETTINGS, || self.load_settings())
            .await
    }

    /// Get the configured booking time slots.
    pub async fn get_time_slots(&self) -> Vec<String> {
        if !self.is_enabled() {
            return self.load_time_slots().await;
        }

        self.read_through(keys::TIME_SLOTS, || self.load_time_slots())
            .await
    }

    /// Get the Google Calendar connection settings as one cached unit.
    pub async fn get_google_config(&self) -> GoogleCalendarConfig {
        if !self.is_enabled() {
            return self.load_google_config().await;
        }

        self.read_through(keys::GOOGLE_CONFIG, || self.load_google_config())
            .await
    }

    /// Drop every cached settings entry, leaving other groups untouched.
    pub async fn clear_settings_cache(&self) {
        for name in SETTINGS_CACHE_KEYS {
            let cache_key = self.cache_key(name);
            if let Err(error) = self.backend.delete(&cache_key).await {
                tracing::debug!(
                    target: "quotekit::cache",
                    key = %cache_key,
                    %error,
                    "cache delete failed"
                );
            }
            self.metrics.record_delete();
        }
    }

    /// Flush the whole cache group and zero the counters.
    pub async fn clear_all_cache(&self) {
        if let Err(error) = self.backend.flush_group(&self.config.group).await {
            tracing::debug!(
                target: "quotekit::cache",
                group = %self.config.group,
                %error,
                "cache flush failed"
            );
        }
        self.metrics.reset();
    }

    /// Pre-populate the composite entries.
    ///
    /// No-op when the cache is not enabled.
    pub async fn warm_cache(&self) {
        if !self.is_enabled() {
            return;
        }

        self.get_settings().await;
        self.get_time_slots().await;
        self.get_google_config().await;
    }

    /// Get a statistics report.
    pub fn statistics(&self) -> CacheReport {
        let stats = self.metrics.snapshot();
        CacheReport {
            enabled: self.config.enabled,
            backend_available: self.backend.is_available(),
            group: self.config.group.clone(),
            hit_rate: stats.hit_rate(),
            total_requests: stats.total_requests(),
            stats,
        }
    }

    /// Read-through helper: backend first, then the loader, then a
    /// best-effort backfill. Backend errors count as misses.
    async fn read_through<T, F, Fut>(&self, name: &str, load: F) -> T
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let cache_key = self.cache_key(name);

        match self.backend.get::<T>(&cache_key).await {
            Ok(Some(value)) => {
                self.metrics.record_hit();
                return value;
            }
            Ok(None) => {}
            Err(error) => {
                tracing::debug!(
                    target: "quotekit::cache",
                    key = %cache_key,
                    %error,
                    "cache read failed, treating as miss"
                );
            }
        }

        self.metrics.record_miss();
        let value = load().await;

        if self
            .backend
            .set(&cache_key, &value, self.config.default_ttl)
            .await
            .is_ok()
        {
            self.metrics.record_set();
        }

        value
    }

    async fn store_read(&self, key: &str, default: Value) -> Value {
        match self.store.read(key).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(error) => {
                tracing::debug!(
                    target: "quotekit::cache",
                    key,
                    %error,
                    "settings store read failed, using default"
                );
                default
            }
        }
    }

    async fn read_value(&self, key: &str) -> Option<Value> {
        match self.store.read(key).await {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(
                    target: "quotekit::cache",
                    key,
                    %error,
                    "settings store read failed, using default"
                );
                None
            }
        }
    }

    async fn read_string(&self, key: &str, default: &str) -> String {
        match self.read_value(key).await {
            Some(value) => coerce::as_string(&value, default),
            None => default.to_string(),
        }
    }

    async fn read_bool(&self, key: &str, default: bool) -> bool {
        match self.read_value(key).await {
            Some(value) => coerce::as_bool(&value, default),
            None => default,
        }
    }

    async fn read_u32(&self, key: &str, default: u32) -> u32 {
        match self.read_value(key).await {
            Some(value) => coerce::as_u32(&value, default),
            None => default,
        }
    }

    async fn read_i64(&self, key: &str, default: i64) -> i64 {
        match self.read_value(key).await {
            Some(value) => coerce::as_i64(&value, default),
            None => default,
        }
    }

    async fn load_settings(&self) -> QuoteSettings {
        let defaults = QuoteSettings::default();
        QuoteSettings {
            quote_prefix: self
                .read_string(keys::QUOTE_PREFIX, &defaults.quote_prefix)
                .await,
            quote_start_number: self
                .read_string(keys::QUOTE_START_NUMBER, &defaults.quote_start_number)
                .await,
            send_to_admin: self
                .read_bool(keys::SEND_TO_ADMIN, defaults.send_to_admin)
                .await,
            send_to_client: self
                .read_bool(keys::SEND_TO_CLIENT, defaults.send_to_client)
                .await,
            admin_email: self
                .read_string(keys::ADMIN_EMAIL, &defaults.admin_email)
                .await,
            email_subject_admin: self
                .read_string(keys::EMAIL_SUBJECT_ADMIN, &defaults.email_subject_admin)
                .await,
            email_subject_client: self
                .read_string(keys::EMAIL_SUBJECT_CLIENT, &defaults.email_subject_client)
                .await,
            enable_pdf: self.read_bool(keys::ENABLE_PDF, defaults.enable_pdf).await,
            meeting_duration: self
                .read_u32(keys::MEETING_DURATION, defaults.meeting_duration)
                .await,
            auto_create_event: self
                .read_bool(keys::AUTO_CREATE_EVENT, defaults.auto_create_event)
                .await,
        }
    }

    async fn load_time_slots(&self) -> Vec<String> {
        match self.read_value(keys::TIME_SLOTS).await {
            Some(value) => coerce::as_string_list(&value, &DEFAULT_TIME_SLOTS),
            None => DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    async fn load_google_config(&self) -> GoogleCalendarConfig {
        let defaults = GoogleCalendarConfig::default();
        GoogleCalendarConfig {
            client_id: self
                .read_string(keys::GOOGLE_CLIENT_ID, &defaults.client_id)
                .await,
            client_secret: self
                .read_string(keys::GOOGLE_CLIENT_SECRET, &defaults.client_secret)
                .await,
            connected: self
                .read_bool(keys::GOOGLE_CONNECTED, defaults.connected)
                .await,
            access_token: self
                .read_string(keys::GOOGLE_ACCESS_TOKEN, &defaults.access_token)
                .await,
            refresh_token: self
                .read_string(keys::GOOGLE_REFRESH_TOKEN, &defaults.refresh_token)
                .await,
            token_expires: self
                .read_i64(keys::GOOGLE_TOKEN_EXPIRES, defaults.token_expires)
                .await,
            calendar_id: self
                .read_string(keys::GOOGLE_CALENDAR_ID, &defaults.calendar_id)
                .await,
            auto_create_event: self
                .read_bool(keys::AUTO_CREATE_EVENT, defaults.auto_create_event)
                .await,
            meeting_duration: self
                .read_u32(keys::MEETING_DURATION, defaults.meeting_duration)
                .await,
        }
    }
}
