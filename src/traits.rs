//! # Ordering-Index Trait
//!
//! Every eviction policy in this crate is an *ordering index*: a structure that
//! watches insert, touch, and remove events for the entries of one cache and can
//! name the entry that should be evicted next. The index never owns keys or
//! values; it deals only in the entry store's [`SlotId`]s and hands back an
//! [`OrderHandle`] that the entry keeps so later events are O(1).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        BoundedCache<K, V, C>                          │
//!   │                                                                      │
//!   │   EntryStore (key → SlotId → Entry { key, value, order })            │
//!   │         │                                     ▲                      │
//!   │         │ on_insert(SlotId) → OrderHandle     │ peek/evict → SlotId  │
//!   │         ▼                                     │                      │
//!   │   PolicyIndex (enum, one variant per policy) ─┘                      │
//!   │     Lru │ Mru │ Lfu │ Fifo │ SecondChance │ Random                   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! | Method          | Mutates | Meaning                                           |
//! |-----------------|---------|---------------------------------------------------|
//! | `on_insert`     | yes     | record a fresh entry                              |
//! | `on_touch`      | yes     | record an access                                  |
//! | `on_replace`    | yes     | an existing entry's value was overwritten         |
//! | `on_remove`     | yes     | forget an entry; it is never selected again       |
//! | `peek_victim`   | no      | entry that would be evicted now                   |
//! | `evict_victim`  | yes     | same choice as `peek_victim`, committing sweeps   |
//! | `reset`         | yes     | forget everything                                 |
//! | `iter_order`    | no      | canonical enumeration order                       |
//!
//! `evict_victim` does not remove the victim: the coordinator raises its
//! pre-eviction event first and then calls `on_remove`.

use crate::ds::SlotId;

/// Handle an ordering index issues for one entry.
///
/// For list-backed policies this is the id of the entry's node in the
/// policy's own list; for the random policy it is the entry id itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle(pub(crate) SlotId);

impl OrderHandle {
    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        Self(SlotId(usize::MAX))
    }
}

/// Ordering strategy behind a bounded cache.
///
/// # Example
///
/// ```
/// use evictcache::ds::SlotArena;
/// use evictcache::policy::fifo::FifoOrder;
/// use evictcache::traits::EvictionOrder;
///
/// let mut entries = SlotArena::new();
/// let mut order = FifoOrder::with_capacity(2);
///
/// let a = entries.insert("a");
/// let ha = order.on_insert(a);
/// let b = entries.insert("b");
/// order.on_insert(b);
///
/// order.on_touch(ha);
/// assert_eq!(order.peek_victim(), Some(a));
/// ```
pub trait EvictionOrder {
    /// Iterator over entry ids in enumeration order.
    type Iter<'a>: Iterator<Item = SlotId>
    where
        Self: 'a;

    /// Records a newly inserted entry as the freshest one.
    fn on_insert(&mut self, entry: SlotId) -> OrderHandle;

    /// Records an access. Returns `true` if the enumeration order changed.
    fn on_touch(&mut self, handle: OrderHandle) -> bool;

    /// Records that an existing entry's value was replaced. Returns `true` if
    /// the enumeration order changed.
    fn on_replace(&mut self, handle: OrderHandle) -> bool {
        let _ = handle;
        false
    }

    /// Forgets an entry.
    fn on_remove(&mut self, handle: OrderHandle);

    /// Returns the entry that would be evicted next without changing anything.
    fn peek_victim(&self) -> Option<SlotId>;

    /// Selects the victim, committing any bookkeeping the selection implies.
    fn evict_victim(&mut self) -> Option<SlotId>;

    /// Drops all ordering state.
    fn reset(&mut self);

    /// Number of tracked entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry ids in the policy's enumeration order.
    fn iter_order(&self) -> Self::Iter<'_>;
}
