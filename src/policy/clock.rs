//! Second-chance (CLOCK) ordering.
//!
//! Implements the Clock algorithm, which approximates LRU with O(1) access
//! operations: a touch only sets a referenced bit, and eviction sweeps a hand
//! around the ring clearing bits until it finds an unreferenced entry.
//!
//! ## Algorithm
//!
//! ```text
//! TOUCH(entry):
//!   referenced = true
//!
//! INSERT(entry):
//!   link the entry directly behind the hand (last in sweep order)
//!
//! EVICT():
//!   loop:
//!     slot = ring[hand]
//!     if slot.referenced:
//!       slot.referenced = false   // second chance
//!       hand = next(hand)
//!     else:
//!       return slot               // hand rests here until the slot leaves
//! ```
//!
//! `peek_victim` replays the same walk on a shared borrow without clearing
//! any bit, so repeated peeks agree with each other and with the next real
//! eviction. Only `evict_victim` advances the hand.
//!
//! ## Example Usage
//!
//! ```
//! use evictcache::{BoundedCache, EvictionPolicy};
//!
//! let mut cache = BoundedCache::try_new(2, EvictionPolicy::SecondChance)?;
//! cache.insert("a", 1)?;
//! cache.insert("b", 2)?;
//! cache.touch(&"a");
//!
//! cache.insert("c", 3)?;
//! assert!(cache.contains_key(&"a"));
//! assert!(!cache.contains_key(&"b"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::iter::Map;

use crate::ds::{ClockRing, RingIter, SlotId};
use crate::ds::clock_ring::Slot;
use crate::traits::{EvictionOrder, OrderHandle};

fn slot_entry(slot: &Slot<SlotId>) -> SlotId {
    *slot.value()
}

/// Clock ring over entry ids.
#[derive(Debug, Default)]
pub struct ClockOrder {
    ring: ClockRing<SlotId>,
}

impl ClockOrder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: ClockRing::with_capacity(capacity),
        }
    }

    /// Returns whether the entry behind `handle` currently holds a second chance.
    pub fn is_referenced(&self, handle: OrderHandle) -> Option<bool> {
        self.ring.get(handle.0).map(Slot::is_referenced)
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        self.ring.debug_validate_invariants();
    }
}

impl EvictionOrder for ClockOrder {
    type Iter<'a> = Map<RingIter<'a, Slot<SlotId>>, fn(&Slot<SlotId>) -> SlotId>;

    fn on_insert(&mut self, entry: SlotId) -> OrderHandle {
        OrderHandle(self.ring.insert(entry))
    }

    fn on_touch(&mut self, handle: OrderHandle) -> bool {
        self.ring.touch(handle.0);
        false
    }

    fn on_remove(&mut self, handle: OrderHandle) {
        self.ring.remove(handle.0);
    }

    fn peek_victim(&self) -> Option<SlotId> {
        self.ring.peek_victim().copied()
    }

    fn evict_victim(&mut self) -> Option<SlotId> {
        let id = self.ring.sweep()?;
        self.ring.get(id).map(slot_entry)
    }

    fn reset(&mut self) {
        self.ring.clear();
    }

    fn len(&self) -> usize {
        self.ring.len()
    }

    fn iter_order(&self) -> Self::Iter<'_> {
        self.ring
            .iter()
            .map(slot_entry as fn(&Slot<SlotId>) -> SlotId)
    }
}
