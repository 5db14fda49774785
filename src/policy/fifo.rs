//! First In, First Out ordering.
//!
//! Every entry is stamped with a monotonically increasing insertion sequence
//! number and appended to an arrival list. Touches and value replacements
//! leave the list alone, so the head always carries the smallest sequence
//! number among live entries.
//!
//! ```text
//!   head ──► [A #0] ◄──► [B #1] ◄──► [C #4] ◄── tail
//!            victim                   newest
//! ```
//!
//! Removing an entry unlinks its node immediately; there are no stale queue
//! slots to skip during eviction.

use std::iter::Map;

use crate::ds::{IntrusiveList, IntrusiveListIter, SlotId};
use crate::traits::{EvictionOrder, OrderHandle};

/// Arrival-list node: entry id plus its insertion sequence number.
#[derive(Debug, Clone, Copy)]
pub struct FifoNode {
    entry: SlotId,
    seq: u64,
}

fn node_entry(node: &FifoNode) -> SlotId {
    node.entry
}

/// Arrival list; victim is the oldest insertion.
#[derive(Debug, Default)]
pub struct FifoOrder {
    arrivals: IntrusiveList<FifoNode>,
    next_seq: u64,
}

impl FifoOrder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arrivals: IntrusiveList::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insertion sequence number of the entry behind `handle`.
    pub fn insertion_seq(&self, handle: OrderHandle) -> Option<u64> {
        self.arrivals.get(handle.0).map(|node| node.seq)
    }

    fn oldest(&self) -> Option<SlotId> {
        self.arrivals
            .front_id()
            .and_then(|id| self.arrivals.get(id))
            .map(|node| node.entry)
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        self.arrivals.debug_validate_invariants();
        let seqs: Vec<u64> = self.arrivals.iter().map(|node| node.seq).collect();
        assert!(seqs.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(seqs.last().is_none_or(|&last| last < self.next_seq));
    }
}

impl EvictionOrder for FifoOrder {
    type Iter<'a> = Map<IntrusiveListIter<'a, FifoNode>, fn(&FifoNode) -> SlotId>;

    fn on_insert(&mut self, entry: SlotId) -> OrderHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        OrderHandle(self.arrivals.push_back(FifoNode { entry, seq }))
    }

    fn on_touch(&mut self, handle: OrderHandle) -> bool {
        let _ = handle;
        false
    }

    fn on_remove(&mut self, handle: OrderHandle) {
        self.arrivals.remove(handle.0);
    }

    fn peek_victim(&self) -> Option<SlotId> {
        self.oldest()
    }

    fn evict_victim(&mut self) -> Option<SlotId> {
        self.oldest()
    }

    fn reset(&mut self) {
        self.arrivals.clear();
        self.next_seq = 0;
    }

    fn len(&self) -> usize {
        self.arrivals.len()
    }

    fn iter_order(&self) -> Self::Iter<'_> {
        self.arrivals.iter().map(node_entry as fn(&FifoNode) -> SlotId)
    }
}
