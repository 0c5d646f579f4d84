//! Cache capability contract.
//!
//! Every store variant implements [`Cache`], so callers can hold any of
//! them behind `Arc<dyn Cache<V>>` without knowing which one they have.

use async_trait::async_trait;

/// Minimal operation set shared by all cache variants.
///
/// Implementations must be safe to call from many tasks at once. None of
/// the operations can fail: a missing or expired key is a normal outcome
/// reported by `get` returning `None`.
#[async_trait]
pub trait Cache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Inserts or overwrites the value stored under `key`.
    async fn set(&self, key: String, value: V);

    /// Returns a copy of the value if the key is present and still live.
    async fn get(&self, key: &str) -> Option<V>;

    /// Removes `key` if present. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str);
}
