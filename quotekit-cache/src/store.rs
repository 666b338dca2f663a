//! The durable settings store seam.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;

use super::error::CacheResult;

/// The durable key/value store that settings live in.
///
/// This is the system of record the cache sits in front of; keys are the
/// unprefixed setting names (`"quote_prefix"`, `"time_slots"`, ...). How
/// the store namespaces or persists them is its own business.
pub trait SettingsStore: Send + Sync + 'static {
    /// Read the raw value for a setting, `None` when it was never written.
    fn read(&self, key: &str) -> impl Future<Output = CacheResult<Option<Value>>> + Send;

    /// Write the raw value for a setting.
    fn write(&self, key: &str, value: Value) -> impl Future<Output = CacheResult<()>> + Send;
}

/// An in-process settings store.
///
/// Holds the full settings map in memory; used by tests and by embedders
/// that load settings once at startup.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given values.
    pub fn with_values(values: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            values: RwLock::new(values.into_iter().collect()),
        }
    }

    /// Insert a value directly, bypassing the async seam.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.values.write().insert(key.into(), value);
    }

    /// Number of stored settings.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether the store holds no settings.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl SettingsStore for MemoryStore {
    async fn read(&self, key: &str) -> CacheResult<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> CacheResult<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }
}
