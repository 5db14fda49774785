//! Random replacement ordering.
//!
//! Victims are drawn uniformly at random from the live entries. Accesses are
//! not tracked at all.
//!
//! ## Architecture
//!
//! ```text
//!   members: Vec<SlotId>                 positions: FxHashMap<SlotId, usize>
//!   ┌─────┬─────┬─────┬─────┐            ┌────────┬─────┐
//!   │  A  │  B  │  C  │  D  │            │   A    │  0  │
//!   └─────┴─────┴─────┴─────┘            │   B    │  1  │  ...
//!
//!   Removal (swap-remove), e.g. B:
//!     - swap B with the last member:  [A, D, C, B]
//!     - fix D's position:              D → 1
//!     - pop:                           [A, D, C]
//! ```
//!
//! ## Selection
//!
//! The generator is a seedable [`SmallRng`]. `peek_victim` draws from a
//! *clone* of the generator, so it never advances the real state: repeated
//! peeks return the same entry, and the next `evict_victim` draws the very
//! same index from the live generator before advancing it.
//!
//! | Operation      | Time |
//! |----------------|------|
//! | `on_insert`    | O(1) |
//! | `on_remove`    | O(1) |
//! | `peek_victim`  | O(1) |
//! | `evict_victim` | O(1) |

use std::iter::Copied;
use std::slice;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::ds::SlotId;
use crate::traits::{EvictionOrder, OrderHandle};

/// Uniform random victim selection.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    members: Vec<SlotId>,
    positions: FxHashMap<SlotId, usize>,
    rng: SmallRng,
}

impl RandomOrder {
    /// Creates an ordering seeded from the thread-local generator.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_rng(capacity, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Creates an ordering with a fixed seed, for reproducible eviction.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: SmallRng) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            rng,
        }
    }

    fn pick(members: &[SlotId], rng: &mut SmallRng) -> Option<SlotId> {
        if members.is_empty() {
            return None;
        }
        Some(members[rng.random_range(0..members.len())])
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        assert_eq!(self.members.len(), self.positions.len());
        for (idx, member) in self.members.iter().enumerate() {
            assert_eq!(self.positions.get(member), Some(&idx));
        }
    }
}

impl Default for RandomOrder {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl EvictionOrder for RandomOrder {
    type Iter<'a> = Copied<slice::Iter<'a, SlotId>>;

    fn on_insert(&mut self, entry: SlotId) -> OrderHandle {
        self.positions.insert(entry, self.members.len());
        self.members.push(entry);
        OrderHandle(entry)
    }

    fn on_touch(&mut self, handle: OrderHandle) -> bool {
        let _ = handle;
        false
    }

    fn on_remove(&mut self, handle: OrderHandle) {
        let Some(idx) = self.positions.remove(&handle.0) else {
            return;
        };
        self.members.swap_remove(idx);
        if let Some(&moved) = self.members.get(idx) {
            self.positions.insert(moved, idx);
        }
    }

    fn peek_victim(&self) -> Option<SlotId> {
        let mut rng = self.rng.clone();
        Self::pick(&self.members, &mut rng)
    }

    fn evict_victim(&mut self) -> Option<SlotId> {
        Self::pick(&self.members, &mut self.rng)
    }

    fn reset(&mut self) {
        self.members.clear();
        self.positions.clear();
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn iter_order(&self) -> Self::Iter<'_> {
        self.members.iter().copied()
    }
}
