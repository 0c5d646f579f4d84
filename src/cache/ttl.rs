//! TTL Cache Module
//!
//! Key/value store whose entries expire after a time-to-live. Expired
//! entries become invisible to `get` immediately and are physically
//! removed later by a background sweeper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{Cache, CacheEntry};
use crate::tasks::Sweeper;

// == Public Constants ==
/// Lower bound for the derived sweep period
pub const MIN_CLEANUP_INTERVAL: Duration = Duration::from_secs(1);

/// Upper bound for the derived sweep period
pub const MAX_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Entry map shared between the cache and its sweeper.
pub(crate) type EntryMap<V> = Arc<RwLock<HashMap<String, CacheEntry<V>>>>;

/// Derives the sweep period from the default TTL: half of it, clamped to
/// [`MIN_CLEANUP_INTERVAL`, `MAX_CLEANUP_INTERVAL`].
pub fn cleanup_interval_for(default_ttl: Duration) -> Duration {
    (default_ttl / 2).clamp(MIN_CLEANUP_INTERVAL, MAX_CLEANUP_INTERVAL)
}

/// Removes every entry expired at `now`, returning how many were dropped.
fn remove_expired<V>(entries: &mut HashMap<String, CacheEntry<V>>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|key, entry| {
        let expired = entry.is_expired_at(now);
        if expired {
            debug!(key = %key, "removing expired entry");
        }
        !expired
    });
    before - entries.len()
}

/// Takes the write lock on `entries` and runs one sweep.
pub(crate) async fn sweep_expired<V>(entries: &EntryMap<V>) -> usize {
    let mut guard = entries.write().await;
    remove_expired(&mut guard, Instant::now())
}

// == TTL Cache ==
/// Cache with per-entry expiration and a background sweeper.
///
/// Construction spawns the sweeper on the current tokio runtime. Call
/// [`TtlCache::stop`] exactly once before discarding the cache to join it;
/// a cache dropped without `stop` aborts its sweeper instead.
///
/// # Example
/// ```ignore
/// let cache = TtlCache::new(Duration::from_secs(2));
/// cache.set("session:abc".to_string(), "active").await;
/// assert_eq!(cache.get("session:abc").await, Some("active"));
/// cache.stop().await;
/// ```
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Entries shared with the sweeper task
    entries: EntryMap<V>,
    /// TTL applied by `set`
    default_ttl: Duration,
    /// Period between sweeps
    cleanup_interval: Duration,
    /// Sweeper handle, taken by `stop`
    sweeper: Mutex<Option<Sweeper>>,
}

impl<V> TtlCache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its sweeper.
    ///
    /// The sweep period is derived with [`cleanup_interval_for`].
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_cleanup_interval(default_ttl, cleanup_interval_for(default_ttl))
    }

    /// Creates an empty cache sweeping every `cleanup_interval`.
    ///
    /// A zero interval is raised to [`MIN_CLEANUP_INTERVAL`] and anything
    /// longer than [`MAX_CLEANUP_INTERVAL`] is capped to it.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn with_cleanup_interval(default_ttl: Duration, cleanup_interval: Duration) -> Self {
        let cleanup_interval = if cleanup_interval.is_zero() {
            MIN_CLEANUP_INTERVAL
        } else {
            cleanup_interval.min(MAX_CLEANUP_INTERVAL)
        };

        let entries: EntryMap<V> = Arc::new(RwLock::new(HashMap::new()));
        let sweeper = Sweeper::spawn(entries.clone(), cleanup_interval);

        Self {
            entries,
            default_ttl,
            cleanup_interval,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }
}

impl<V> TtlCache<V> {
    /// Returns the TTL applied by `set`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the period between background sweeps.
    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    // == Set With TTL ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Overwriting a key replaces both its value and its deadline.
    pub async fn set_with_ttl(&self, key: String, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);
        debug!(key = %key, ttl = ?ttl, "set");
        self.entries.write().await.insert(key, entry);
    }

    // == Clear ==
    /// Discards every entry regardless of expiration state.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        *entries = HashMap::new();
        debug!(dropped, "cache cleared");
    }

    // == Size ==
    /// Returns the number of physically stored entries.
    ///
    /// Entries that have expired but not been swept yet are counted.
    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Purge Expired ==
    /// Runs one sweep immediately, returning the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        sweep_expired(&self.entries).await
    }

    // == Stop ==
    /// Stops the sweeper and waits until it has exited.
    ///
    /// A sweep already in progress finishes first. Once this returns no
    /// further sweeps run and the cache can be dropped. Foreground
    /// operations keep working afterwards, but expired entries are only
    /// reclaimed by [`TtlCache::purge_expired`] or [`TtlCache::clear`].
    ///
    /// Call this once per cache. A repeated call logs a warning and
    /// returns immediately.
    pub async fn stop(&self) {
        let sweeper = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sweeper {
            Some(sweeper) => sweeper.shutdown().await,
            None => warn!("TTL cache sweeper already stopped"),
        }
    }
}

#[async_trait]
impl<V> Cache<V> for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn set(&self, key: String, value: V) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        // Expired entries stay in the map until the next sweep.
        if entry.is_expired() {
            debug!(key = %key, "get: expired");
            return None;
        }

        debug!(key = %key, "get: hit");
        Some(entry.value.clone())
    }

    async fn delete(&self, key: &str) {
        debug!(key = %key, "delete");
        self.entries.write().await.remove(key);
    }
}

impl<V> Drop for TtlCache<V> {
    fn drop(&mut self) {
        let sweeper = self
            .sweeper
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(sweeper) = sweeper {
            warn!("TTL cache dropped without stop, aborting sweeper");
            sweeper.abort();
        }
    }
}
