//! Read-through settings cache for the QuoteKit quote-request service.
//!
//! Settings live in a durable store that is slow to hit on every request;
//! this crate puts a fast, TTL-bounded cache layer in front of it:
//!
//! - [`SettingsStore`] - the durable system of record (trait seam)
//! - [`CacheBackend`] - the fast volatile layer (trait seam), with
//!   [`MemoryCache`] and [`NoopCache`] implementations
//! - [`SettingsCache`] - the read-through facade combining the two,
//!   with hit/miss/set/delete counters in an injected [`CacheMetrics`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use quotekit_cache::{MemoryCache, MemoryStore, SettingsCache};
//!
//! let cache = SettingsCache::new(MemoryCache::default(), MemoryStore::new());
//!
//! let settings = cache.get_settings().await;
//! let slots = cache.get_time_slots().await;
//!
//! println!("{}", cache.statistics());
//! ```
//!
//! Caching is selected by one runtime flag (plus backend availability);
//! when off, every read goes straight to the store and no counters move.

mod backend;
mod error;
mod key;
mod memory;
mod settings;
mod settings_cache;
mod stats;
mod store;

pub use backend::{CacheBackend, NoopCache};
pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use memory::{MemoryCache, MemoryCacheConfig};
pub use settings::{DEFAULT_TIME_SLOTS, GoogleCalendarConfig, QuoteSettings, coerce};
pub use settings_cache::{SettingsCache, SettingsCacheConfig};
pub use stats::{CacheMetrics, CacheReport, CacheStats};
pub use store::{MemoryStore, SettingsStore};
