//! Bounded cache with pluggable eviction.
//!
//! [`BoundedCache`] pairs an entry store with one ordering index and runs the
//! evict-then-insert protocol whenever an insert would exceed capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────────┐
//!   │ BoundedCache<K, V, C>                                                 │
//!   │                                                                       │
//!   │   store: EntryStore<K, V, C>         order: PolicyIndex               │
//!   │   ┌──────────────────────────┐       ┌──────────────────────────┐     │
//!   │   │ SlotId → Entry {         │──────►│ on_insert / on_touch     │     │
//!   │   │   key, value,            │       │ on_remove                │     │
//!   │   │   order: OrderHandle }   │◄──────│ peek/evict → SlotId      │     │
//!   │   └──────────────────────────┘       └──────────────────────────┘     │
//!   │                                                                       │
//!   │   capacity, policy              (fixed at construction)               │
//!   │   total_touches, evictions      (reset by clear)                      │
//!   │   version                       (bumped on membership/order change)   │
//!   │   listeners: Evicting[], Evicted[]                                    │
//!   └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert protocol
//!
//! ```text
//!   insert(k, v):
//!     loop:
//!       k present        → replace value in place, no events, done
//!       len < capacity   → link k into store and order, done
//!       victim = order.evict_victim()
//!       raise Evicting(victim)
//!       victim already gone? → next round, nothing counted
//!       remove victim, evictions += 1
//!       raise Evicted(victim)
//! ```
//!
//! A listener error aborts the insert at the step that raised it; whatever
//! was already done stays done and `k` is not inserted.
//!
//! ## Accounting
//!
//! | Operation                                   | `total_touches` | `evictions` |
//! |---------------------------------------------|-----------------|-------------|
//! | `get` / `get_mut` / `fetch` / `touch` hit   | +1              |             |
//! | any miss, `peek`, `contains_key`            |                 |             |
//! | `insert` (new or replace)                   |                 | +1 per victim |
//! | `remove`                                    |                 |             |
//! | `clear`                                     | reset           | reset       |
//!
//! ## Example Usage
//!
//! ```
//! use evictcache::{BoundedCache, EvictionPolicy};
//!
//! let mut cache = BoundedCache::try_new(2, EvictionPolicy::Lru)?;
//! cache.insert("a", 1)?;
//! cache.insert("b", 2)?;
//! cache.touch(&"a");
//!
//! assert_eq!(cache.peek_eviction_candidate(), Some(&"b"));
//! cache.insert("c", 3)?;
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["a", "c"]);
//! assert_eq!(cache.eviction_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::comparer::{KeyComparer, NaturalKeys};
use crate::ds::SlotId;
use crate::error::{CacheError, ConfigError, HandlerError};
use crate::events::{EvictionPhase, ListenerId, Listeners};
use crate::policy::{EvictionPolicy, OrderIter, PolicyIndex};
use crate::stats::CacheStats;
use crate::store::{Entry, EntryStore};
use crate::traits::EvictionOrder;

/// A cache behind a lock, for callers that share one cache across threads.
pub type SharedCache<K, V, C = NaturalKeys> = Arc<Mutex<BoundedCache<K, V, C>>>;

/// Fixed-capacity map that evicts by the configured [`EvictionPolicy`].
pub struct BoundedCache<K, V, C = NaturalKeys> {
    store: EntryStore<K, V, C>,
    order: PolicyIndex,
    capacity: usize,
    policy: EvictionPolicy,
    total_touches: u64,
    evictions: u64,
    version: u64,
    listeners: Listeners<K, V, C>,
}

impl<K, V> BoundedCache<K, V, NaturalKeys>
where
    K: Eq + Hash,
{
    /// Creates an empty cache using natural key equality.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize, policy: EvictionPolicy) -> Result<Self, ConfigError> {
        Self::try_with_comparer(capacity, policy, NaturalKeys)
    }
}

impl<K, V, C> BoundedCache<K, V, C>
where
    C: KeyComparer<K>,
{
    /// Creates an empty cache whose key equality is decided by `comparer`.
    ///
    /// ```
    /// use evictcache::comparer::CaseInsensitive;
    /// use evictcache::{BoundedCache, EvictionPolicy};
    ///
    /// let mut cache = BoundedCache::try_with_comparer(4, EvictionPolicy::Fifo, CaseInsensitive)?;
    /// cache.insert("Key".to_string(), 1)?;
    /// assert_eq!(cache.peek(&"KEY".to_string()), Some(&1));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_with_comparer(
        capacity: usize,
        policy: EvictionPolicy,
        comparer: C,
    ) -> Result<Self, ConfigError> {
        Self::from_parts(capacity, policy, comparer, None)
    }

    pub(crate) fn from_parts(
        capacity: usize,
        policy: EvictionPolicy,
        comparer: C,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        debug!(capacity, %policy, seeded = seed.is_some(), "creating bounded cache");
        Ok(Self {
            store: EntryStore::with_capacity(capacity, comparer),
            order: PolicyIndex::new(policy, capacity, seed),
            capacity,
            policy,
            total_touches: 0,
            evictions: 0,
            version: 0,
            listeners: Listeners::new(),
        })
    }

    // -- accessors ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn comparer(&self) -> &C {
        self.store.comparer()
    }

    /// Successful read accesses since construction or the last `clear`.
    pub fn total_touches(&self) -> u64 {
        self.total_touches
    }

    /// Capacity-triggered removals since construction or the last `clear`.
    pub fn eviction_count(&self) -> u64 {
        self.evictions
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            policy: self.policy,
            capacity: self.capacity,
            len: self.store.len(),
            total_touches: self.total_touches,
            evictions: self.evictions,
        }
    }

    /// Structural version; changes whenever membership or enumeration order does.
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    // -- reads --------------------------------------------------------------

    /// Returns the value for `key` and records an access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.touch_entry(key)?;
        self.store.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get), with mutable access to the value.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.touch_entry(key)?;
        self.store.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns the value for `key` and records an access.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is absent.
    pub fn fetch(&mut self, key: &K) -> Result<&V, CacheError> {
        self.get(key).ok_or(CacheError::KeyNotFound)
    }

    /// Records an access to `key` without reading it. Returns `false` if the
    /// key is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        self.touch_entry(key).is_some()
    }

    /// Records an access to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is absent.
    pub fn touch_or_err(&mut self, key: &K) -> Result<(), CacheError> {
        if self.touch(key) {
            Ok(())
        } else {
            Err(CacheError::KeyNotFound)
        }
    }

    /// Returns the value for `key` without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.get_value(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.store.contains_key(key)
    }

    /// Key the next capacity-triggered insert would evict.
    ///
    /// Never mutates anything: repeated calls agree with each other and with
    /// the next eviction, including for the random and second-chance
    /// policies.
    pub fn peek_eviction_candidate(&self) -> Option<&K> {
        let id = self.order.peek_victim()?;
        self.store.get(id).map(|entry| &entry.key)
    }

    fn touch_entry(&mut self, key: &K) -> Option<SlotId> {
        let id = self.store.find(key)?;
        let handle = self.store.get(id)?.order;
        if self.order.on_touch(handle) {
            self.version += 1;
        }
        self.total_touches += 1;
        Some(id)
    }

    // -- writes -------------------------------------------------------------

    /// Inserts `value` under `key`, evicting first if the cache is full.
    ///
    /// Returns the previous value if `key` was already present; replacing a
    /// value never evicts and never raises events.
    ///
    /// `K: Clone` and `V: Clone` are needed to hand the victim to
    /// [`on_evicting`](Self::on_evicting) listeners while it is still stored.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Handler`] if an eviction listener fails. The
    /// cache keeps every change made before the failure and `key` is not
    /// inserted.
    pub fn insert(&mut self, key: K, mut value: V) -> Result<Option<V>, CacheError>
    where
        K: Clone,
        V: Clone,
    {
        loop {
            // listeners run during eviction and may insert `key` themselves
            value = match self.replace_existing(&key, value) {
                Ok(previous) => return Ok(Some(previous)),
                Err(value) => value,
            };
            if self.store.len() < self.capacity || !self.evict_one()? {
                break;
            }
        }
        self.attach(key, value);
        Ok(None)
    }

    /// Inserts every pair in order, stopping at the first listener error.
    ///
    /// # Errors
    ///
    /// Propagates the first [`CacheError`] raised by [`insert`](Self::insert).
    pub fn extend_from<I>(&mut self, entries: I) -> Result<(), CacheError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Clone,
        V: Clone,
    {
        for (key, value) in entries {
            self.insert(key, value)?;
        }
        Ok(())
    }

    /// Removes `key`. Not an eviction: no events, no counter changes.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.store.find(key)?;
        self.detach(id).map(|entry| (entry.key, entry.value))
    }

    /// Drops every entry and resets the touch and eviction counters.
    /// Listeners stay subscribed.
    pub fn clear(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        self.order.reset();
        self.total_touches = 0;
        self.evictions = 0;
        self.version += 1;
        debug!(dropped, policy = %self.policy, "cleared bounded cache");
    }

    /// Swaps in `value` if `key` is present, handing `value` back otherwise.
    fn replace_existing(&mut self, key: &K, value: V) -> Result<V, V> {
        let Some(entry) = self.store.find(key).and_then(|id| self.store.get_mut(id)) else {
            return Err(value);
        };
        let previous = mem::replace(&mut entry.value, value);
        let handle = entry.order;
        if self.order.on_replace(handle) {
            self.version += 1;
        }
        Ok(previous)
    }

    fn attach(&mut self, key: K, value: V) {
        let id = self.store.next_id();
        let handle = self.order.on_insert(id);
        let stored = self.store.insert(key, value, handle);
        debug_assert_eq!(stored, id);
        self.version += 1;
    }

    fn detach(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        let entry = self.store.remove(id)?;
        self.order.on_remove(entry.order);
        self.version += 1;
        Some(entry)
    }

    /// Runs one eviction round. Returns `false` if the policy had no victim.
    fn evict_one(&mut self) -> Result<bool, CacheError>
    where
        K: Clone,
        V: Clone,
    {
        let Some(victim) = self.order.evict_victim() else {
            debug_assert!(self.store.len() == 0, "populated cache produced no victim");
            return Ok(false);
        };
        // selecting a CLOCK victim moves the hand, which reorders enumeration
        self.version += 1;
        trace!(policy = %self.policy, victim = victim.index(), "selected eviction victim");

        if self.listeners.count(EvictionPhase::Evicting) > 0 {
            let Some((key, value)) = self
                .store
                .get(victim)
                .map(|entry| (entry.key.clone(), entry.value.clone()))
            else {
                return Ok(false);
            };
            self.raise(EvictionPhase::Evicting, &key, &value)?;
            if self.store.find(&key) != Some(victim) {
                trace!(victim = victim.index(), "victim removed by listener");
                return Ok(true);
            }
        }

        let Some(entry) = self.detach(victim) else {
            return Ok(false);
        };
        self.evictions += 1;
        trace!(evictions = self.evictions, "eviction committed");
        self.raise(EvictionPhase::Evicted, &entry.key, &entry.value)?;
        Ok(true)
    }

    // -- listeners ----------------------------------------------------------

    /// Subscribes `handler` to run before each victim is removed.
    ///
    /// The handler sees the victim still in the cache and may mutate the
    /// cache. If it removes the victim itself, no eviction is counted and no
    /// `Evicted` event follows for that victim.
    pub fn on_evicting<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut Self, &K, &V) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.listeners
            .subscribe(EvictionPhase::Evicting, Arc::new(handler))
    }

    /// Subscribes `handler` to run after each victim is removed.
    pub fn on_evicted<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut Self, &K, &V) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.listeners
            .subscribe(EvictionPhase::Evicted, Arc::new(handler))
    }

    /// Removes a handler; returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn raise(&mut self, phase: EvictionPhase, key: &K, value: &V) -> Result<(), CacheError> {
        for handler in self.listeners.snapshot(phase) {
            handler(self, key, value).map_err(|source| CacheError::Handler { phase, source })?;
        }
        Ok(())
    }

    // -- enumeration --------------------------------------------------------

    /// Iterates entries in the policy's enumeration order.
    ///
    /// | Policy        | Order                                         |
    /// |---------------|-----------------------------------------------|
    /// | LRU, MRU      | least to most recently used                   |
    /// | LFU, FIFO     | insertion order                               |
    /// | Second chance | ring order starting at the clock hand         |
    /// | Random        | internal slot order                           |
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            store: &self.store,
            order: self.order.iter_order(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Wraps the cache in a [`SharedCache`].
    pub fn into_shared(self) -> SharedCache<K, V, C> {
        Arc::new(Mutex::new(self))
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.store.debug_validate_invariants();
        self.order.debug_validate_invariants();
        assert!(self.store.len() <= self.capacity);
        assert_eq!(self.store.len(), self.order.len());
        let mut enumerated = 0;
        for id in self.order.iter_order() {
            assert!(self.store.get(id).is_some(), "ordered entry missing from store");
            enumerated += 1;
        }
        assert_eq!(enumerated, self.store.len());
    }
}

impl<K, V, C> fmt::Debug for BoundedCache<K, V, C>
where
    C: KeyComparer<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("policy", &self.policy)
            .field("capacity", &self.capacity)
            .field("len", &self.store.len())
            .field("total_touches", &self.total_touches)
            .field("evictions", &self.evictions)
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// Iterator over `(key, value)` pairs in enumeration order.
pub struct Iter<'a, K, V, C> {
    store: &'a EntryStore<K, V, C>,
    order: OrderIter<'a>,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C>
where
    C: KeyComparer<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        self.order
            .find_map(|id| store.get(id))
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, K, V, C> IntoIterator for &'a BoundedCache<K, V, C>
where
    C: KeyComparer<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
