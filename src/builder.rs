//! Builder for [`BoundedCache`].
//!
//! Collects capacity, policy, key comparer, and an optional random seed, then
//! validates them in one place.
//!
//! ## Example
//!
//! ```rust
//! use evictcache::builder::CacheBuilder;
//! use evictcache::comparer::CaseInsensitive;
//! use evictcache::EvictionPolicy;
//!
//! let cache = CacheBuilder::new(2)
//!     .policy(EvictionPolicy::Fifo)
//!     .comparer(CaseInsensitive)
//!     .try_build_from([("a".to_string(), 1), ("B".to_string(), 2), ("c".to_string(), 3)])?;
//!
//! // the oversized source is replayed through insert, so FIFO keeps the last two
//! assert_eq!(cache.len(), 2);
//! assert!(cache.contains_key(&"b".to_string()));
//! assert_eq!(cache.eviction_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::cache::BoundedCache;
use crate::comparer::{KeyComparer, NaturalKeys};
use crate::error::{CacheError, ConfigError};
use crate::policy::EvictionPolicy;

/// Builder for creating [`BoundedCache`] instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder<C = NaturalKeys> {
    capacity: usize,
    policy: EvictionPolicy,
    comparer: C,
    seed: Option<u64>,
}

impl CacheBuilder<NaturalKeys> {
    /// Starts a builder for an LRU cache with natural key equality.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: EvictionPolicy::default(),
            comparer: NaturalKeys,
            seed: None,
        }
    }
}

impl<C> CacheBuilder<C> {
    pub fn policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fixes the seed of the [`Random`](EvictionPolicy::Random) policy.
    /// Other policies ignore it.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the key comparer.
    pub fn comparer<C2>(self, comparer: C2) -> CacheBuilder<C2> {
        CacheBuilder {
            capacity: self.capacity,
            policy: self.policy,
            comparer,
            seed: self.seed,
        }
    }

    /// Builds an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    pub fn try_build<K, V>(self) -> Result<BoundedCache<K, V, C>, ConfigError>
    where
        C: KeyComparer<K>,
    {
        BoundedCache::from_parts(self.capacity, self.policy, self.comparer, self.seed)
    }

    /// Builds a cache and inserts `entries` in order.
    ///
    /// Sources larger than the capacity are trimmed by ordinary eviction, so
    /// which entries survive follows the policy.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] for an invalid configuration.
    pub fn try_build_from<K, V, I>(self, entries: I) -> Result<BoundedCache<K, V, C>, CacheError>
    where
        C: KeyComparer<K>,
        K: Clone,
        V: Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut cache = self.try_build()?;
        cache.extend_from(entries)?;
        Ok(cache)
    }
}
