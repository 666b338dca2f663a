//! Cache backend trait and the no-op backend.

use super::error::CacheResult;
use super::key::CacheKey;
use std::future::Future;
use std::time::Duration;

/// The core trait for fast cache backends.
///
/// A backend is the volatile layer in front of the durable settings store.
/// Values travel through serde, so any serializable type can be cached.
pub trait CacheBackend: Send + Sync + 'static {
    /// Get a value from the cache.
    fn get<T>(&self, key: &CacheKey) -> impl Future<Output = CacheResult<Option<T>>> + Send
    where
        T: serde::de::DeserializeOwned;

    /// Set a value in the cache with the given time-to-live.
    fn set<T>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> impl Future<Output = CacheResult<()>> + Send
    where
        T: serde::Serialize + Sync;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed.
    fn delete(&self, key: &CacheKey) -> impl Future<Output = CacheResult<bool>> + Send;

    /// Evict every entry in the given group.
    ///
    /// Returns the number of evicted entries.
    fn flush_group(&self, group: &str) -> impl Future<Output = CacheResult<usize>> + Send;

    /// Whether the backend is actually able to cache.
    ///
    /// A host without an external object cache wires in [`NoopCache`],
    /// which reports `false` here; the settings cache then bypasses the
    /// backend entirely.
    fn is_available(&self) -> bool {
        true
    }

    /// Get the approximate number of entries.
    fn len(&self) -> impl Future<Output = CacheResult<usize>> + Send;

    /// Check if the cache is empty.
    fn is_empty(&self) -> impl Future<Output = CacheResult<bool>> + Send {
        async move { Ok(self.len().await? == 0) }
    }
}

/// A no-op cache backend that doesn't cache anything.
///
/// Stands in when no fast cache layer is configured; every read misses
/// and `is_available()` reports `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl CacheBackend for NoopCache {
    async fn get<T>(&self, _key: &CacheKey) -> CacheResult<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        Ok(None)
    }

    async fn set<T>(&self, _key: &CacheKey, _value: &T, _ttl: Duration) -> CacheResult<()>
    where
        T: serde::Serialize + Sync,
    {
        Ok(())
    }

    async fn delete(&self, _key: &CacheKey) -> CacheResult<bool> {
        Ok(false)
    }

    async fn flush_group(&self, _group: &str) -> CacheResult<usize> {
        Ok(0)
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn len(&self) -> CacheResult<usize> {
        Ok(0)
    }
}
