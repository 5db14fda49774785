//! Most Recently Used ordering.
//!
//! Shares the LRU recency chain and only flips which end is evicted: the
//! victim is the entry inserted or touched last. Useful for cyclic scans
//! larger than the cache, where the freshest entry is the one least likely to
//! be needed again soon.
//!
//! ```text
//!   head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!                                ▲
//!                              victim
//! ```

use crate::ds::SlotId;
use crate::policy::lru::LruOrder;
use crate::traits::{EvictionOrder, OrderHandle};

/// Recency chain; victim is the most recently used entry.
#[derive(Debug, Default)]
pub struct MruOrder {
    chain: LruOrder,
}

impl MruOrder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chain: LruOrder::with_capacity(capacity),
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        self.chain.debug_validate_invariants();
    }
}

impl EvictionOrder for MruOrder {
    type Iter<'a> = <LruOrder as EvictionOrder>::Iter<'a>;

    fn on_insert(&mut self, entry: SlotId) -> OrderHandle {
        self.chain.on_insert(entry)
    }

    fn on_touch(&mut self, handle: OrderHandle) -> bool {
        self.chain.on_touch(handle)
    }

    fn on_replace(&mut self, handle: OrderHandle) -> bool {
        self.chain.on_replace(handle)
    }

    fn on_remove(&mut self, handle: OrderHandle) {
        self.chain.on_remove(handle);
    }

    fn peek_victim(&self) -> Option<SlotId> {
        self.chain.newest()
    }

    fn evict_victim(&mut self) -> Option<SlotId> {
        self.chain.newest()
    }

    fn reset(&mut self) {
        self.chain.reset();
    }

    fn len(&self) -> usize {
        self.chain.len()
    }

    fn iter_order(&self) -> Self::Iter<'_> {
        self.chain.iter_order()
    }
}
