//! The sliding-window rate limiter.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::config::RateLimiterConfig;
use super::error::RateLimitError;

/// Width of the sliding request window.
const WINDOW: Duration = Duration::from_secs(60);

/// Hash a client address to its stored digest.
///
/// Raw addresses never persist inside the limiter; everything is keyed by
/// this SHA-256 hex digest.
pub fn client_hash(client: &str) -> String {
    hex::encode(Sha256::digest(client.as_bytes()))
}

/// A currently blocked client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedClient {
    /// Digest of the blocked client's address.
    pub ip_hash: String,
    /// Wall-clock time the block lapses.
    pub blocked_until: DateTime<Utc>,
    /// Time left on the block.
    pub remaining: Duration,
}

/// Limiter counters and configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitStats {
    /// Whether limiting is applied.
    pub enabled: bool,
    /// Submissions allowed per client per minute.
    pub max_per_minute: u32,
    /// Block duration in seconds.
    pub block_duration_secs: u64,
    /// Number of clients currently blocked.
    pub currently_blocked: usize,
    /// Submissions allowed since construction.
    pub allowed: u64,
    /// Submissions denied since construction.
    pub denied: u64,
}

impl std::fmt::Display for RateLimitStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} allowed, {} denied, {} blocked ({}/min, {}s blocks, enabled: {})",
            self.allowed,
            self.denied,
            self.currently_blocked,
            self.max_per_minute,
            self.block_duration_secs,
            self.enabled
        )
    }
}

struct Block {
    until: Instant,
    until_utc: DateTime<Utc>,
}

/// Sliding-window submission limiter with a block list.
///
/// Each client gets a 60 s window of submission instants; filling the
/// window installs a block for the configured duration. Clients are keyed
/// by address digest, so the limiter holds no raw addresses.
pub struct RateLimiter {
    config: RateLimiterConfig,
    windows: Mutex<HashMap<String, Vec<Instant>>>,
    blocks: Mutex<HashMap<String, Block>>,
    allowed: AtomicU64,
    denied: AtomicU64,
}

impl RateLimiter {
    /// Create a limiter with the given config.
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
            blocks: Mutex::new(HashMap::new()),
            allowed: AtomicU64::new(0),
            denied: AtomicU64::new(0),
        }
    }

    /// Get the config.
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Decide whether a submission from this client may proceed.
    ///
    /// Disabled limiters and whitelisted clients always pass, without
    /// moving counters. Everyone else consumes one slot in their sliding
    /// window; a full window installs a block for the configured duration.
    pub fn check(&self, client: &str) -> Result<(), RateLimitError> {
        if !self.config.enabled {
            return Ok(());
        }
        if self.config.whitelist.iter().any(|w| w == client) {
            return Ok(());
        }

        let hash = client_hash(client);
        let now = Instant::now();

        if let Some(retry_after) = self.active_block(&hash, now) {
            self.denied.fetch_add(1, Ordering::Relaxed);
            return Err(RateLimitError::Blocked { retry_after });
        }

        let mut windows = self.windows.lock();
        let window = windows.entry(hash.clone()).or_default();
        window.retain(|&instant| now.duration_since(instant) < WINDOW);

        if window.len() >= self.config.max_per_minute as usize {
            drop(windows);
            self.block(&hash, now);
            self.denied.fetch_add(1, Ordering::Relaxed);

            tracing::warn!(
                target: "quotekit::limit",
                ip_hash = %hash,
                max_per_minute = self.config.max_per_minute,
                block_secs = self.config.block_duration.as_secs(),
                "submission rate exceeded, client blocked"
            );
            return Err(RateLimitError::Blocked {
                retry_after: self.config.block_duration,
            });
        }

        window.push(now);
        self.allowed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Whether this client is currently blocked.
    pub fn is_blocked(&self, client: &str) -> bool {
        self.active_block(&client_hash(client), Instant::now())
            .is_some()
    }

    /// The clients currently blocked, expired blocks pruned.
    pub fn blocked_clients(&self) -> Vec<BlockedClient> {
        let now = Instant::now();
        let mut blocks = self.blocks.lock();
        blocks.retain(|_, block| block.until > now);

        blocks
            .iter()
            .map(|(hash, block)| BlockedClient {
                ip_hash: hash.clone(),
                blocked_until: block.until_utc,
                remaining: block.until - now,
            })
            .collect()
    }

    /// Lift the block on one client digest.
    ///
    /// Returns whether a block existed.
    pub fn unblock(&self, ip_hash: &str) -> bool {
        let removed = self.blocks.lock().remove(ip_hash).is_some();
        if removed {
            self.windows.lock().remove(ip_hash);
            tracing::info!(
                target: "quotekit::limit",
                ip_hash,
                "client unblocked"
            );
        }
        removed
    }

    /// Lift every block, returning how many were lifted.
    pub fn unblock_all(&self) -> usize {
        let mut blocks = self.blocks.lock();
        let count = blocks.len();
        blocks.clear();
        self.windows.lock().clear();
        count
    }

    /// Get a statistics snapshot.
    pub fn statistics(&self) -> RateLimitStats {
        let now = Instant::now();
        let mut blocks = self.blocks.lock();
        blocks.retain(|_, block| block.until > now);

        RateLimitStats {
            enabled: self.config.enabled,
            max_per_minute: self.config.max_per_minute,
            block_duration_secs: self.config.block_duration.as_secs(),
            currently_blocked: blocks.len(),
            allowed: self.allowed.load(Ordering::Relaxed),
            denied: self.denied.load(Ordering::Relaxed),
        }
    }

    /// Remaining block time for a digest, dropping the block if it lapsed.
    fn active_block(&self, hash: &str, now: Instant) -> Option<Duration> {
        let mut blocks = self.blocks.lock();
        match blocks.get(hash) {
            Some(block) if block.until > now => Some(block.until - now),
            Some(_) => {
                blocks.remove(hash);
                None
            }
            None => None,
        }
    }

    fn block(&self, hash: &str, now: Instant) {
        self.blocks.lock().insert(
            hash.to_string(),
            Block {
                until: now + self.config.block_duration,
                until_utc: Utc::now()
                    + chrono::Duration::from_std(self.config.block_duration)
                        .unwrap_or(chrono::Duration::zero()),
            },
        );
    }
}
