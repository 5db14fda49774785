//! Comparer-driven entry store.
//!
//! ## Architecture
//! - Entries live in a `SlotArena<Entry<K, V>>`; each entry carries its key,
//!   value, cached key hash, and the handle of its node in the ordering index.
//! - `buckets: FxHashMap<u64, SmallVec<[SlotId; 1]>>` maps a comparer hash to
//!   the entries sharing it. Collisions are resolved with
//!   [`KeyComparer::keys_equal`], so lookups never clone or re-own a key.
//!
//! ## Core Operations
//! - `find`: key → `SlotId` (O(1) average).
//! - `insert`: adds a new entry; the caller guarantees the key is absent.
//! - `remove`: drops an entry by `SlotId`.
//! - `get_value` / `contains_key`: key-addressed conveniences.
//!
//! Capacity is not enforced here; the eviction coordinator owns that rule.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::comparer::KeyComparer;
use crate::ds::{SlotArena, SlotId};
use crate::traits::OrderHandle;

/// A live cache entry.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) order: OrderHandle,
    hash: u64,
}

/// Key → entry store with pluggable key equality.
pub(crate) struct EntryStore<K, V, C> {
    entries: SlotArena<Entry<K, V>>,
    buckets: FxHashMap<u64, SmallVec<[SlotId; 1]>>,
    comparer: C,
}

impl<K, V, C> EntryStore<K, V, C>
where
    C: KeyComparer<K>,
{
    pub(crate) fn with_capacity(capacity: usize, comparer: C) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            buckets: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            comparer,
        }
    }

    pub(crate) fn comparer(&self) -> &C {
        &self.comparer
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Id the next [`insert`](Self::insert) will use.
    pub(crate) fn next_id(&self) -> SlotId {
        self.entries.next_id()
    }

    /// Locates the entry for `key`.
    pub(crate) fn find(&self, key: &K) -> Option<SlotId> {
        let hash = self.comparer.hash_key(key);
        self.find_hashed(hash, key)
    }

    fn find_hashed(&self, hash: u64, key: &K) -> Option<SlotId> {
        self.buckets.get(&hash)?.iter().copied().find(|&id| {
            self.entries
                .get(id)
                .is_some_and(|entry| self.comparer.keys_equal(&entry.key, key))
        })
    }

    /// Inserts a new entry. The key must not already be present.
    pub(crate) fn insert(&mut self, key: K, value: V, order: OrderHandle) -> SlotId {
        let hash = self.comparer.hash_key(&key);
        debug_assert!(self.find_hashed(hash, &key).is_none());
        let id = self.entries.insert(Entry {
            key,
            value,
            order,
            hash,
        });
        self.buckets.entry(hash).or_default().push(id);
        id
    }

    pub(crate) fn get(&self, id: SlotId) -> Option<&Entry<K, V>> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut Entry<K, V>> {
        self.entries.get_mut(id)
    }

    /// Removes the entry at `id`, unlinking it from its hash bucket.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        let entry = self.entries.remove(id)?;
        if let Some(bucket) = self.buckets.get_mut(&entry.hash) {
            bucket.retain(|other| *other != id);
            if bucket.is_empty() {
                self.buckets.remove(&entry.hash);
            }
        }
        Some(entry)
    }

    pub(crate) fn get_value(&self, key: &K) -> Option<&V> {
        self.find(key)
            .and_then(|id| self.entries.get(id))
            .map(|entry| &entry.value)
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        let bucketed: usize = self.buckets.values().map(|bucket| bucket.len()).sum();
        assert_eq!(bucketed, self.entries.len());
        for (id, entry) in self.entries.iter() {
            assert_eq!(entry.hash, self.comparer.hash_key(&entry.key));
            let bucket = self.buckets.get(&entry.hash).expect("entry missing bucket");
            assert!(bucket.contains(&id));
            assert_eq!(self.find(&entry.key), Some(id));
        }
    }
}
