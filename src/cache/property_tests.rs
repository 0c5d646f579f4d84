//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check both cache variants against a plain `HashMap`
//! model and to check the TTL laws under a paused clock.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{Cache, SimpleCache, TtlCache};

// == Test Configuration ==
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}".prop_map(|s| s)
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}".prop_map(|s| s)
}

/// A single operation against the capability contract
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

/// Replays `ops` against `cache` and a `HashMap`, returning the first
/// `get` whose answer differs from the model.
async fn replay_against_model(
    cache: &dyn Cache<String>,
    ops: Vec<CacheOp>,
) -> Option<(String, Option<String>, Option<String>)> {
    let mut model: HashMap<String, String> = HashMap::new();

    for op in ops {
        match op {
            CacheOp::Set { key, value } => {
                model.insert(key.clone(), value.clone());
                cache.set(key, value).await;
            }
            CacheOp::Get { key } => {
                let actual = cache.get(&key).await;
                let expected = model.get(&key).cloned();
                if actual != expected {
                    return Some((key, expected, actual));
                }
            }
            CacheOp::Delete { key } => {
                model.remove(&key);
                cache.delete(&key).await;
            }
        }
    }

    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the unbounded cache answers every
    // get exactly like a plain map would.
    #[test]
    fn prop_simple_cache_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mismatch = tokio_test::block_on(async {
            let cache: SimpleCache<String> = SimpleCache::new();
            replay_against_model(&cache, ops).await
        });
        prop_assert!(mismatch.is_none(), "Mismatch: {:?}", mismatch);
    }

    // Before anything expires, the TTL cache behaves like the unbounded one.
    #[test]
    fn prop_ttl_cache_matches_model_before_expiry(
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let mismatch = tokio_test::block_on(async {
            let cache: TtlCache<String> = TtlCache::new(TEST_DEFAULT_TTL);
            let mismatch = replay_against_model(&cache, ops).await;
            cache.stop().await;
            mismatch
        });
        prop_assert!(mismatch.is_none(), "Mismatch: {:?}", mismatch);
    }

    // Overwriting a key keeps a single physical entry holding the newest value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let (retrieved, size) = tokio_test::block_on(async {
            let cache = TtlCache::new(TEST_DEFAULT_TTL);
            cache.set(key.clone(), value1).await;
            cache.set(key.clone(), value2.clone()).await;
            let result = (cache.get(&key).await, cache.size().await);
            cache.stop().await;
            result
        });

        prop_assert_eq!(retrieved, Some(value2), "Overwrite should return new value");
        prop_assert_eq!(size, 1, "Should have exactly one entry after overwrite");
    }

    // Clear leaves nothing reachable and nothing stored.
    #[test]
    fn prop_clear_is_total(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..30)
    ) {
        let (any_found, size) = tokio_test::block_on(async {
            let cache = TtlCache::new(TEST_DEFAULT_TTL);
            for (key, value) in &entries {
                cache.set(key.clone(), value.clone()).await;
            }

            cache.clear().await;

            let mut any_found = false;
            for (key, _) in &entries {
                any_found |= cache.get(key).await.is_some();
            }
            let size = cache.size().await;
            cache.stop().await;
            (any_found, size)
        });

        prop_assert!(!any_found, "No key should survive clear");
        prop_assert_eq!(size, 0);
    }
}

// Time-sensitive properties run on a paused clock so no real sleeping happens
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // An entry is visible strictly before its TTL elapses and invisible after.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in 1u64..5_000
    ) {
        let (before, after) = tokio_test::block_on(async {
            tokio::time::pause();
            let ttl = Duration::from_millis(ttl_ms);
            let cache = TtlCache::new(TEST_DEFAULT_TTL);

            cache.set_with_ttl(key.clone(), value.clone(), ttl).await;
            tokio::time::advance(ttl - Duration::from_millis(1)).await;
            let before = cache.get(&key).await;

            tokio::time::advance(Duration::from_millis(1)).await;
            let after = cache.get(&key).await;

            cache.stop().await;
            (before, after)
        });

        prop_assert_eq!(before, Some(value), "Entry should exist before TTL elapses");
        prop_assert!(after.is_none(), "Entry should be gone once TTL elapses");
    }

    // Without any reads, the sweeper reclaims every expired entry within
    // one cleanup interval after expiry.
    #[test]
    fn prop_sweeper_reclaims_expired(count in 1usize..50) {
        let (before, after) = tokio_test::block_on(async {
            tokio::time::pause();
            let ttl = Duration::from_millis(100);
            let cache = TtlCache::new(ttl);

            for i in 0..count {
                cache.set(format!("key{}", i), i.to_string()).await;
            }
            let before = cache.size().await;

            tokio::time::sleep(ttl + cache.cleanup_interval() + Duration::from_millis(10)).await;
            let after = cache.size().await;

            cache.stop().await;
            (before, after)
        });

        prop_assert_eq!(before, count);
        prop_assert_eq!(after, 0);
    }
}
