//! Cache key construction.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// A cache key that uniquely identifies a cached value.
///
/// Keys are structured as `group:name` so that a whole group can be
/// flushed in one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// The cache group (usually one group per subsystem).
    group: String,
    /// The entry name within the group, prefix included.
    name: String,
}

impl CacheKey {
    /// Create a new cache key.
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Get the full key string.
    pub fn as_str(&self) -> String {
        let mut key = String::with_capacity(self.group.len() + self.name.len() + 1);
        key.push_str(&self.group);
        key.push(':');
        key.push_str(&self.name);
        key
    }

    /// Get the group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Get the entry name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.name.hash(state);
    }
}
