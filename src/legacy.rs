//! Compatibility surfaces for callers that cannot hold a typed borrow.
//!
//! - [`Cursor`]: a detached enumerator. It stores a position and the cache's
//!   structural version instead of a borrow, so the cache can be mutated
//!   between steps; the next step then fails with
//!   [`CacheError::ConcurrentModification`].
//! - [`ErasedCache`]: an object-safe view over `dyn Any` keys and values for
//!   heterogeneous registries. Wrong types fail with
//!   [`CacheError::TypeMismatch`].
//!
//! ## Example Usage
//!
//! ```
//! use evictcache::error::CacheError;
//! use evictcache::legacy::ErasedCache;
//! use evictcache::{BoundedCache, EvictionPolicy};
//!
//! let mut cache = BoundedCache::<u32, String>::try_new(4, EvictionPolicy::Fifo)?;
//! cache.insert(1, "one".to_string())?;
//!
//! let mut cursor = cache.cursor();
//! assert_eq!(cursor.next_entry(&cache)?, Some((&1, &"one".to_string())));
//! cache.insert(2, "two".to_string())?;
//! assert!(matches!(cursor.next_entry(&cache), Err(CacheError::ConcurrentModification)));
//!
//! let erased: &mut dyn ErasedCache = &mut cache;
//! assert!(erased.contains_any(&2u32)?);
//! assert!(matches!(erased.contains_any(&"2"), Err(CacheError::TypeMismatch { .. })));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::any::{Any, type_name};

use crate::cache::BoundedCache;
use crate::comparer::KeyComparer;
use crate::error::CacheError;
use crate::policy::EvictionPolicy;

/// Detached position in a cache's enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    version: u64,
    position: usize,
}

impl Cursor {
    /// Returns the next entry, or `None` once every entry has been visited.
    ///
    /// Each step re-walks the enumeration up to the current position, so a
    /// full pass costs O(n²). Use [`BoundedCache::iter`] when a borrow can be
    /// held across the walk.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConcurrentModification`] if the cache's
    /// membership or enumeration order changed since the cursor was created
    /// or last [`rewind`](Self::rewind)ed.
    pub fn next_entry<'a, K, V, C>(
        &mut self,
        cache: &'a BoundedCache<K, V, C>,
    ) -> Result<Option<(&'a K, &'a V)>, CacheError>
    where
        C: KeyComparer<K>,
    {
        if cache.version() != self.version {
            return Err(CacheError::ConcurrentModification);
        }
        let entry = cache.iter().nth(self.position);
        if entry.is_some() {
            self.position += 1;
        }
        Ok(entry)
    }

    /// Resynchronizes with `cache` and restarts from the first entry.
    pub fn rewind<K, V, C>(&mut self, cache: &BoundedCache<K, V, C>)
    where
        C: KeyComparer<K>,
    {
        self.version = cache.version();
        self.position = 0;
    }

    /// Number of entries already yielded.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<K, V, C> BoundedCache<K, V, C>
where
    C: KeyComparer<K>,
{
    /// Creates a [`Cursor`] at the start of the enumeration order.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            version: self.version(),
            position: 0,
        }
    }
}

/// Type-erased cache operations.
pub trait ErasedCache {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn policy(&self) -> EvictionPolicy;

    /// Non-touching membership test.
    fn contains_any(&self, key: &dyn Any) -> Result<bool, CacheError>;

    /// Touching read, like [`BoundedCache::get`].
    fn get_any(&mut self, key: &dyn Any) -> Result<Option<&dyn Any>, CacheError>;

    /// Insert, evicting if needed, like [`BoundedCache::insert`].
    fn insert_any(
        &mut self,
        key: Box<dyn Any>,
        value: Box<dyn Any>,
    ) -> Result<Option<Box<dyn Any>>, CacheError>;

    fn remove_any(&mut self, key: &dyn Any) -> Result<Option<Box<dyn Any>>, CacheError>;

    fn clear(&mut self);
}

fn mismatch<T>(role: &'static str) -> CacheError {
    CacheError::TypeMismatch {
        role,
        expected: type_name::<T>(),
    }
}

fn key_ref<K: Any>(key: &dyn Any) -> Result<&K, CacheError> {
    key.downcast_ref::<K>().ok_or_else(|| mismatch::<K>("key"))
}

impl<K, V, C> ErasedCache for BoundedCache<K, V, C>
where
    K: Any + Clone,
    V: Any + Clone,
    C: KeyComparer<K>,
{
    fn len(&self) -> usize {
        BoundedCache::len(self)
    }

    fn capacity(&self) -> usize {
        BoundedCache::capacity(self)
    }

    fn policy(&self) -> EvictionPolicy {
        BoundedCache::policy(self)
    }

    fn contains_any(&self, key: &dyn Any) -> Result<bool, CacheError> {
        Ok(self.contains_key(key_ref::<K>(key)?))
    }

    fn get_any(&mut self, key: &dyn Any) -> Result<Option<&dyn Any>, CacheError> {
        let key = key_ref::<K>(key)?;
        Ok(self.get(key).map(|value| value as &dyn Any))
    }

    fn insert_any(
        &mut self,
        key: Box<dyn Any>,
        value: Box<dyn Any>,
    ) -> Result<Option<Box<dyn Any>>, CacheError> {
        let key = key.downcast::<K>().map_err(|_| mismatch::<K>("key"))?;
        let value = value.downcast::<V>().map_err(|_| mismatch::<V>("value"))?;
        let previous = self.insert(*key, *value)?;
        Ok(previous.map(|value| Box::new(value) as Box<dyn Any>))
    }

    fn remove_any(&mut self, key: &dyn Any) -> Result<Option<Box<dyn Any>>, CacheError> {
        let key = key_ref::<K>(key)?;
        Ok(self
            .remove(key)
            .map(|value| Box::new(value) as Box<dyn Any>))
    }

    fn clear(&mut self) {
        BoundedCache::clear(self);
    }
}
