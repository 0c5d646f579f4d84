//! Simple Cache Module
//!
//! Unbounded key/value store with no expiration.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::Cache;

// == Simple Cache ==
/// A plain map behind a single reader/writer lock.
///
/// Entries live until they are deleted or the cache is dropped.
#[derive(Debug)]
pub struct SimpleCache<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V> SimpleCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V> Default for SimpleCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> Cache<V> for SimpleCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn set(&self, key: String, value: V) {
        debug!(key = %key, "set");
        self.entries.write().await.insert(key, value);
    }

    async fn get(&self, key: &str) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    async fn delete(&self, key: &str) {
        debug!(key = %key, "delete");
        self.entries.write().await.remove(key);
    }
}
