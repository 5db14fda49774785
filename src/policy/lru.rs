//! Least Recently Used ordering.
//!
//! ## Architecture
//!
//! ```text
//!   IntrusiveList<SlotId> (recency chain)
//!
//!   head ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── tail
//!            │  A   │      │  B   │      │  C   │
//!            └──────┘      └──────┘      └──────┘
//!   least recently used ────────────────► most recently used
//!   (victim)
//! ```
//!
//! Inserts append at the tail, touches move the node to the tail, and the
//! victim is the head. Ties cannot occur: two entries never share a
//! position, and untouched entries keep their insertion order.
//!
//! | Operation      | Time |
//! |----------------|------|
//! | `on_insert`    | O(1) |
//! | `on_touch`     | O(1) |
//! | `on_remove`    | O(1) |
//! | `peek_victim`  | O(1) |

use std::iter::Copied;

use crate::ds::{IntrusiveList, IntrusiveListIter, SlotId};
use crate::traits::{EvictionOrder, OrderHandle};

/// Recency chain; victim is the least recently used entry.
#[derive(Debug, Default)]
pub struct LruOrder {
    chain: IntrusiveList<SlotId>,
}

impl LruOrder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chain: IntrusiveList::with_capacity(capacity),
        }
    }

    /// Least recently used entry.
    pub(crate) fn oldest(&self) -> Option<SlotId> {
        self.chain.front_id().and_then(|id| self.chain.get(id)).copied()
    }

    /// Most recently used entry.
    pub(crate) fn newest(&self) -> Option<SlotId> {
        self.chain.back_id().and_then(|id| self.chain.get(id)).copied()
    }

    fn refresh(&mut self, handle: OrderHandle) -> bool {
        let already_newest = self.chain.back_id() == Some(handle.0);
        self.chain.move_to_back(handle.0) && !already_newest
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        self.chain.debug_validate_invariants();
    }
}

impl EvictionOrder for LruOrder {
    type Iter<'a> = Copied<IntrusiveListIter<'a, SlotId>>;

    fn on_insert(&mut self, entry: SlotId) -> OrderHandle {
        OrderHandle(self.chain.push_back(entry))
    }

    fn on_touch(&mut self, handle: OrderHandle) -> bool {
        self.refresh(handle)
    }

    fn on_replace(&mut self, handle: OrderHandle) -> bool {
        self.refresh(handle)
    }

    fn on_remove(&mut self, handle: OrderHandle) {
        self.chain.remove(handle.0);
    }

    fn peek_victim(&self) -> Option<SlotId> {
        self.oldest()
    }

    fn evict_victim(&mut self) -> Option<SlotId> {
        self.oldest()
    }

    fn reset(&mut self) {
        self.chain.clear();
    }

    fn len(&self) -> usize {
        self.chain.len()
    }

    fn iter_order(&self) -> Self::Iter<'_> {
        self.chain.iter().copied()
    }
}
