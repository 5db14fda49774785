//! Clock-sweep ring for second-chance eviction.
//!
//! Entries sit on an [`IntrusiveList`] that is treated as a ring, with a hand
//! pointing at the next slot to inspect. New entries are linked in directly
//! behind the hand, so they are the last ones the sweep reaches. Accesses set
//! a referenced bit that grants one pass before eviction.
//!
//! ## Architecture
//!
//! ```text
//!   ring (IntrusiveList<Slot<T>>, wraps tail → head)
//!
//!            hand
//!             ▼
//!   ┌──────┐ ┌──────┐ ┌──────┐ ┌──────┐
//!   │ D  0 │ │ A  1 │ │ B  0 │ │ C  1 │
//!   └──────┘ └──────┘ └──────┘ └──────┘
//!   new entries are inserted here ▲ (just before the hand)
//!
//!   Sweep from the hand:
//!   [A ref=1] -> clear ref, advance
//!   [B ref=0] -> stop, B is the victim, hand stays on B
//! ```
//!
//! ## Operations
//!
//! | Operation      | Time         | Notes                                  |
//! |----------------|--------------|----------------------------------------|
//! | `insert`       | O(1)         | links behind the hand                  |
//! | `touch`        | O(1)         | sets the referenced bit                |
//! | `remove`       | O(1)         | advances the hand if it pointed here   |
//! | `peek_victim`  | O(n) worst   | simulated sweep, nothing is cleared    |
//! | `sweep`        | O(n) worst   | clears bits until an unreferenced slot |
//!
//! A sweep stops within one revolution plus one step: after a full
//! revolution every bit it passed has been cleared, so the slot under the
//! hand is unreferenced.
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::intrusive_list::{IntrusiveList, RingIter};
use crate::ds::slot_arena::SlotId;

#[derive(Debug, Clone, Copy)]
pub struct Slot<T> {
    value: T,
    referenced: bool,
}

impl<T> Slot<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_referenced(&self) -> bool {
        self.referenced
    }
}

#[derive(Debug)]
/// Ring implementing the CLOCK (second-chance) sweep.
pub struct ClockRing<T> {
    ring: IntrusiveList<Slot<T>>,
    hand: Option<SlotId>,
}

impl<T> ClockRing<T> {
    pub fn new() -> Self {
        Self {
            ring: IntrusiveList::new(),
            hand: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: IntrusiveList::with_capacity(capacity),
            hand: None,
        }
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Slot the next sweep starts from.
    pub fn hand(&self) -> Option<SlotId> {
        self.hand
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot<T>> {
        self.ring.get(id)
    }

    /// Links `value` directly behind the hand, unreferenced.
    pub fn insert(&mut self, value: T) -> SlotId {
        let slot = Slot {
            value,
            referenced: false,
        };
        match self.hand {
            Some(hand) => self.ring.insert_before(hand, slot),
            None => {
                let id = self.ring.push_back(slot);
                self.hand = Some(id);
                id
            },
        }
    }

    /// Sets the referenced bit; returns `false` if `id` is not in the ring.
    pub fn touch(&mut self, id: SlotId) -> bool {
        match self.ring.get_mut(id) {
            Some(slot) => {
                slot.referenced = true;
                true
            },
            None => false,
        }
    }

    /// Unlinks `id`, moving the hand to its successor if needed.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if self.hand == Some(id) {
            self.hand = self.ring.next_id_wrapping(id).filter(|next| *next != id);
        }
        self.ring.remove(id).map(|slot| slot.value)
    }

    /// Returns the slot a sweep would stop on, without clearing any bits.
    pub fn peek_victim(&self) -> Option<&T> {
        let hand = self.hand?;
        self.ring
            .iter_ring_from(Some(hand))
            .find(|slot| !slot.referenced)
            .or_else(|| self.ring.get(hand))
            .map(|slot| &slot.value)
    }

    /// Advances the hand, clearing referenced bits, until it rests on an
    /// unreferenced slot; returns that slot's id. The slot is not removed.
    pub fn sweep(&mut self) -> Option<SlotId> {
        let mut cursor = self.hand?;
        for _ in 0..=self.ring.len() {
            let slot = self.ring.get_mut(cursor)?;
            if !slot.referenced {
                self.hand = Some(cursor);
                return Some(cursor);
            }
            slot.referenced = false;
            cursor = self.ring.next_id_wrapping(cursor)?;
        }
        None
    }

    /// Iterates slots in sweep order, starting at the hand.
    pub fn iter(&self) -> RingIter<'_, Slot<T>> {
        self.ring.iter_ring_from(self.hand)
    }

    pub fn clear(&mut self) {
        self.ring.clear();
        self.hand = None;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.ring.debug_validate_invariants();
        match self.hand {
            Some(hand) => assert!(self.ring.contains(hand)),
            None => assert!(self.ring.is_empty()),
        }
    }
}

impl<T> Default for ClockRing<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep_value<T: Copy>(ring: &mut ClockRing<T>) -> Option<T> {
        let id = ring.sweep()?;
        ring.get(id).map(|slot| *slot.value())
    }

    #[test]
    fn sweep_skips_referenced() {
        let mut ring = ClockRing::new();
        let a = ring.insert("a");
        ring.insert("b");
        ring.touch(a);

        assert_eq!(ring.peek_victim(), Some(&"b"));
        assert_eq!(sweep_value(&mut ring), Some("b"));
        assert!(!ring.get(a).expect("a").is_referenced());
        ring.debug_validate_invariants();
    }

    #[test]
    fn peek_does_not_clear_bits() {
        let mut ring = ClockRing::new();
        let a = ring.insert(1);
        ring.insert(2);
        ring.touch(a);

        assert_eq!(ring.peek_victim(), Some(&2));
        assert_eq!(ring.peek_victim(), Some(&2));
        assert!(ring.get(a).expect("a").is_referenced());
    }

    #[test]
    fn all_referenced_wraps_to_hand() {
        let mut ring = ClockRing::new();
        let ids: Vec<_> = (0..3).map(|v| ring.insert(v)).collect();
        for &id in &ids {
            ring.touch(id);
        }
        assert_eq!(ring.peek_victim(), Some(&0));
        assert_eq!(sweep_value(&mut ring), Some(0));
        for &id in &ids {
            assert!(!ring.get(id).expect("slot").is_referenced());
        }
    }

    #[test]
    fn inserts_land_behind_hand() {
        let mut ring = ClockRing::new();
        ring.insert('a');
        ring.insert('b');
        ring.insert('c');
        let order: Vec<_> = ring.iter().map(|slot| *slot.value()).collect();
        assert_eq!(order, vec!['a', 'b', 'c']);

        let victim = ring.sweep().expect("victim");
        ring.remove(victim);
        ring.insert('d');
        let order: Vec<_> = ring.iter().map(|slot| *slot.value()).collect();
        assert_eq!(order, vec!['b', 'c', 'd']);
        ring.debug_validate_invariants();
    }

    #[test]
    fn removing_last_slot_clears_hand() {
        let mut ring = ClockRing::new();
        let a = ring.insert(1);
        assert_eq!(ring.remove(a), Some(1));
        assert_eq!(ring.hand(), None);
        assert_eq!(ring.peek_victim(), None);
        assert_eq!(ring.sweep(), None);
        ring.debug_validate_invariants();
    }
}
