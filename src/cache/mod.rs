//! Cache Module
//!
//! Provides the [`Cache`] capability contract and its two implementations:
//! an unbounded [`SimpleCache`] and a [`TtlCache`] with background expiry.

mod entry;
mod simple;
mod traits;
pub(crate) mod ttl;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use simple::SimpleCache;
pub use traits::Cache;
pub use ttl::{cleanup_interval_for, TtlCache, MAX_CLEANUP_INTERVAL, MIN_CLEANUP_INTERVAL};
