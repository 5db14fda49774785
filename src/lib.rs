//! evictcache: a bounded associative cache with pluggable eviction.
//!
//! [`BoundedCache`] holds at most `capacity` entries and evicts exactly one
//! victim per overflowing insert, chosen by an [`EvictionPolicy`] fixed at
//! construction: LRU, MRU, LFU, FIFO, second chance (CLOCK), or random.
//! Evictions raise `Evicting`/`Evicted` notifications to subscribed
//! listeners, and the cache keeps touch and eviction counters.
//!
//! ```
//! use evictcache::{BoundedCache, EvictionPolicy};
//!
//! let mut cache = BoundedCache::try_new(2, EvictionPolicy::Fifo)?;
//! cache.insert("a", 1)?;
//! cache.insert("b", 2)?;
//! cache.insert("c", 3)?;
//!
//! assert!(!cache.contains_key(&"a"));
//! assert_eq!(cache.eviction_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod cache;
pub mod comparer;
pub mod ds;
pub mod error;
pub mod events;
pub mod legacy;
pub mod policy;
pub mod prelude;
pub mod stats;
mod store;
pub mod traits;

pub use builder::CacheBuilder;
pub use cache::{BoundedCache, SharedCache};
pub use error::{CacheError, ConfigError};
pub use policy::EvictionPolicy;
