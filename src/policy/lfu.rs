//! Least Frequently Used ordering.
//!
//! ## Architecture
//!
//! ```text
//!   arrivals: IntrusiveList<LfuNode>          ranking: BTreeMap<(freq, seq), node>
//!   (insertion order, enumeration)            (eviction order)
//!
//!   head ─► [A f=0 #0] ◄─► [B f=2 #1] ◄─► [C f=0 #2]      (0, #0) → A   ◄── victim
//!                                                          (0, #2) → C
//!                                                          (2, #1) → B
//! ```
//!
//! The ranking key is `(access count, insertion sequence)`, so the first
//! entry is the least frequently used one and ties go to the oldest
//! insertion. A touch re-keys one ranking entry; the arrival list never moves,
//! which keeps enumeration in insertion order regardless of frequency.
//!
//! | Operation      | Time     |
//! |----------------|----------|
//! | `on_insert`    | O(log n) |
//! | `on_touch`     | O(log n) |
//! | `on_remove`    | O(log n) |
//! | `peek_victim`  | O(log n) |

use std::collections::BTreeMap;
use std::iter::Map;

use crate::ds::{IntrusiveList, IntrusiveListIter, SlotId};
use crate::traits::{EvictionOrder, OrderHandle};

/// Arrival-list node carrying an entry's access count.
#[derive(Debug, Clone, Copy)]
pub struct LfuNode {
    entry: SlotId,
    frequency: u64,
    seq: u64,
}

impl LfuNode {
    fn rank(&self) -> (u64, u64) {
        (self.frequency, self.seq)
    }
}

fn node_entry(node: &LfuNode) -> SlotId {
    node.entry
}

/// Frequency ranking with insertion-order tie-break.
#[derive(Debug, Default)]
pub struct LfuOrder {
    arrivals: IntrusiveList<LfuNode>,
    ranking: BTreeMap<(u64, u64), SlotId>,
    next_seq: u64,
}

impl LfuOrder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arrivals: IntrusiveList::with_capacity(capacity),
            ranking: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Access count recorded for the entry behind `handle`.
    pub fn frequency(&self, handle: OrderHandle) -> Option<u64> {
        self.arrivals.get(handle.0).map(|node| node.frequency)
    }

    fn least_frequent(&self) -> Option<SlotId> {
        let (_, &node_id) = self.ranking.first_key_value()?;
        self.arrivals.get(node_id).map(|node| node.entry)
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        self.arrivals.debug_validate_invariants();
        assert_eq!(self.ranking.len(), self.arrivals.len());
        for (rank, &node_id) in &self.ranking {
            let node = self.arrivals.get(node_id).expect("ranked node missing");
            assert_eq!(node.rank(), *rank);
        }
    }
}

impl EvictionOrder for LfuOrder {
    type Iter<'a> = Map<IntrusiveListIter<'a, LfuNode>, fn(&LfuNode) -> SlotId>;

    fn on_insert(&mut self, entry: SlotId) -> OrderHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let node = LfuNode {
            entry,
            frequency: 0,
            seq,
        };
        let id = self.arrivals.push_back(node);
        self.ranking.insert(node.rank(), id);
        OrderHandle(id)
    }

    fn on_touch(&mut self, handle: OrderHandle) -> bool {
        let Some(node) = self.arrivals.get_mut(handle.0) else {
            return false;
        };
        self.ranking.remove(&node.rank());
        node.frequency = node.frequency.saturating_add(1);
        self.ranking.insert(node.rank(), handle.0);
        false
    }

    fn on_remove(&mut self, handle: OrderHandle) {
        if let Some(node) = self.arrivals.remove(handle.0) {
            self.ranking.remove(&node.rank());
        }
    }

    fn peek_victim(&self) -> Option<SlotId> {
        self.least_frequent()
    }

    fn evict_victim(&mut self) -> Option<SlotId> {
        self.least_frequent()
    }

    fn reset(&mut self) {
        self.arrivals.clear();
        self.ranking.clear();
        self.next_seq = 0;
    }

    fn len(&self) -> usize {
        self.arrivals.len()
    }

    fn iter_order(&self) -> Self::Iter<'_> {
        self.arrivals.iter().map(node_entry as fn(&LfuNode) -> SlotId)
    }
}
