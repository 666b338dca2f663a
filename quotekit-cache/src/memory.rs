//! In-process cache backend.
//!
//! Entries are stored as serialized JSON with a per-entry expiry, behind a
//! `parking_lot` read-write lock. Suitable for single-instance hosts and
//! tests; a distributed deployment would wire in a shared backend instead.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::backend::CacheBackend;
use super::error::{CacheError, CacheResult};
use super::key::CacheKey;

/// Configuration for the in-memory cache.
#[derive(Debug, Clone)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries before eviction kicks in.
    pub max_capacity: usize,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self { max_capacity: 10_000 }
    }
}

impl MemoryCacheConfig {
    /// Create a new config with the given capacity.
    pub fn new(max_capacity: usize) -> Self {
        Self { max_capacity }
    }
}

/// A cached entry with metadata.
#[derive(Clone)]
struct CacheEntry {
    /// Serialized value.
    data: Vec<u8>,
    /// When the entry expires.
    expires_at: Instant,
    /// Last access time.
    last_accessed: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            data,
            expires_at: now + ttl,
            last_accessed: now,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache backend with TTL and capacity-bounded eviction.
pub struct MemoryCache {
    config: MemoryCacheConfig,
    entries: RwLock<HashMap<String, CacheEntry>>,
    entry_count: AtomicUsize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(MemoryCacheConfig::default())
    }
}

impl MemoryCache {
    /// Create a new memory cache with the given config.
    pub fn new(config: MemoryCacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            entry_count: AtomicUsize::new(0),
            config,
        }
    }

    /// Create a new memory cache bounded to `max_capacity` entries.
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self::new(MemoryCacheConfig::new(max_capacity))
    }

    /// Get the config.
    pub fn config(&self) -> &MemoryCacheConfig {
        &self.config
    }

    /// Evict expired entries, returning how many were removed.
    pub fn evict_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();

        entries.retain(|_, e| !e.is_expired());

        let evicted = before - entries.len();
        self.entry_count.fetch_sub(evicted, Ordering::Relaxed);
        evicted
    }

    /// Evict the least recently used entries to make room.
    fn evict_lru(&self, count: usize) {
        let mut entries = self.entries.write();

        let mut by_access: Vec<_> = entries
            .iter()
            .map(|(k, e)| (k.clone(), e.last_accessed))
            .collect();
        by_access.sort_by_key(|(_, t)| *t);

        for (key, _) in by_access.into_iter().take(count) {
            entries.remove(&key);
        }

        self.entry_count.store(entries.len(), Ordering::Relaxed);
    }
}

impl CacheBackend for MemoryCache {
    async fn get<T>(&self, key: &CacheKey) -> CacheResult<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let key_str = key.as_str();

        let data = {
            let entries = self.entries.read();
            match entries.get(&key_str) {
                Some(entry) if !entry.is_expired() => entry.data.clone(),
                // Expired entries linger until the next eviction pass
                _ => return Ok(None),
            }
        };

        {
            let mut entries = self.entries.write();
            if let Some(entry) = entries.get_mut(&key_str) {
                entry.last_accessed = Instant::now();
            }
        }

        let value: T = serde_json::from_slice(&data)
            .map_err(|e| CacheError::Deserialization(e.to_string()))?;
        Ok(Some(value))
    }

    async fn set<T>(&self, key: &CacheKey, value: &T, ttl: Duration) -> CacheResult<()>
    where
        T: serde::Serialize + Sync,
    {
        let key_str = key.as_str();

        let data =
            serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let entry = CacheEntry::new(data, ttl);

        let current = self.entry_count.load(Ordering::Relaxed);
        if current >= self.config.max_capacity {
            self.evict_expired();
            let still_over = self.entry_count.load(Ordering::Relaxed);
            if still_over >= self.config.max_capacity {
                self.evict_lru((self.config.max_capacity / 10).max(1));
            }
        }

        {
            let mut entries = self.entries.write();
            let is_new = !entries.contains_key(&key_str);
            entries.insert(key_str, entry);
            if is_new {
                self.entry_count.fetch_add(1, Ordering::Relaxed);
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> CacheResult<bool> {
        let key_str = key.as_str();

        let mut entries = self.entries.write();
        if entries.remove(&key_str).is_some() {
            self.entry_count.fetch_sub(1, Ordering::Relaxed);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn flush_group(&self, group: &str) -> CacheResult<usize> {
        let prefix = format!("{}:", group);

        let mut entries = self.entries.write();
        let before = entries.len();

        entries.retain(|k, _| !k.starts_with(&prefix));

        let removed = before - entries.len();
        self.entry_count.fetch_sub(removed, Ordering::Relaxed);
        Ok(removed)
    }

    async fn len(&self) -> CacheResult<usize> {
        Ok(self.entry_count.load(Ordering::Relaxed))
    }
}
