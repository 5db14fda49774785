//! Eviction policies.
//!
//! Each submodule is one ordering strategy implementing
//! [`EvictionOrder`]. [`PolicyIndex`] is the tagged union the cache owns:
//! the variant is fixed at construction and every call is a `match`, so the
//! hot path is statically dispatched.
//!
//! | Policy                                | Victim                               | Touch effect              |
//! |---------------------------------------|--------------------------------------|---------------------------|
//! | [`Lru`](EvictionPolicy::Lru)          | least recently used                  | move to freshest          |
//! | [`Mru`](EvictionPolicy::Mru)          | most recently used                   | move to freshest          |
//! | [`Lfu`](EvictionPolicy::Lfu)          | lowest access count, oldest on ties  | count + 1                 |
//! | [`Fifo`](EvictionPolicy::Fifo)        | oldest insertion                     | none                      |
//! | [`SecondChance`](EvictionPolicy::SecondChance) | first unreferenced from the hand | set referenced bit |
//! | [`Random`](EvictionPolicy::Random)    | uniform draw                         | none                      |

pub mod clock;
pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod mru;
pub mod random;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::ds::SlotId;
use crate::traits::{EvictionOrder, OrderHandle};
use clock::ClockOrder;
use fifo::FifoOrder;
use lfu::LfuOrder;
use lru::LruOrder;
use mru::MruOrder;
use random::RandomOrder;

/// Eviction algorithm selected at construction time.
///
/// Parses case-insensitively from its kebab-case name, so it can come
/// straight from configuration text:
///
/// ```
/// use evictcache::EvictionPolicy;
///
/// assert_eq!("LRU".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lru));
/// assert_eq!("clock".parse::<EvictionPolicy>(), Ok(EvictionPolicy::SecondChance));
/// assert_eq!(EvictionPolicy::SecondChance.to_string(), "second-chance");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EvictionPolicy {
    /// Least Recently Used.
    #[default]
    Lru,
    /// Most Recently Used.
    Mru,
    /// Least Frequently Used, ties broken by insertion order.
    Lfu,
    /// First In, First Out.
    Fifo,
    /// CLOCK: a referenced entry is skipped once before it can be evicted.
    #[strum(to_string = "second-chance", serialize = "clock")]
    SecondChance,
    /// Uniform random replacement.
    Random,
}

/// The ordering index a cache owns; one variant per [`EvictionPolicy`].
#[derive(Debug)]
pub(crate) enum PolicyIndex {
    Lru(LruOrder),
    Mru(MruOrder),
    Lfu(LfuOrder),
    Fifo(FifoOrder),
    SecondChance(ClockOrder),
    Random(RandomOrder),
}

macro_rules! dispatch {
    ($index:expr, $order:ident => $body:expr) => {
        match $index {
            PolicyIndex::Lru($order) => $body,
            PolicyIndex::Mru($order) => $body,
            PolicyIndex::Lfu($order) => $body,
            PolicyIndex::Fifo($order) => $body,
            PolicyIndex::SecondChance($order) => $body,
            PolicyIndex::Random($order) => $body,
        }
    };
}

impl PolicyIndex {
    pub(crate) fn new(policy: EvictionPolicy, capacity: usize, seed: Option<u64>) -> Self {
        match policy {
            EvictionPolicy::Lru => Self::Lru(LruOrder::with_capacity(capacity)),
            EvictionPolicy::Mru => Self::Mru(MruOrder::with_capacity(capacity)),
            EvictionPolicy::Lfu => Self::Lfu(LfuOrder::with_capacity(capacity)),
            EvictionPolicy::Fifo => Self::Fifo(FifoOrder::with_capacity(capacity)),
            EvictionPolicy::SecondChance => Self::SecondChance(ClockOrder::with_capacity(capacity)),
            EvictionPolicy::Random => Self::Random(match seed {
                Some(seed) => RandomOrder::with_seed(capacity, seed),
                None => RandomOrder::with_capacity(capacity),
            }),
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        dispatch!(self, order => order.debug_validate_invariants())
    }
}

/// Enumeration-order iterator for whichever policy a cache uses.
pub enum OrderIter<'a> {
    Lru(<LruOrder as EvictionOrder>::Iter<'a>),
    Mru(<MruOrder as EvictionOrder>::Iter<'a>),
    Lfu(<LfuOrder as EvictionOrder>::Iter<'a>),
    Fifo(<FifoOrder as EvictionOrder>::Iter<'a>),
    SecondChance(<ClockOrder as EvictionOrder>::Iter<'a>),
    Random(<RandomOrder as EvictionOrder>::Iter<'a>),
}

impl Iterator for OrderIter<'_> {
    type Item = SlotId;

    fn next(&mut self) -> Option<SlotId> {
        match self {
            Self::Lru(iter) => iter.next(),
            Self::Mru(iter) => iter.next(),
            Self::Lfu(iter) => iter.next(),
            Self::Fifo(iter) => iter.next(),
            Self::SecondChance(iter) => iter.next(),
            Self::Random(iter) => iter.next(),
        }
    }
}

impl EvictionOrder for PolicyIndex {
    type Iter<'a> = OrderIter<'a>;

    fn on_insert(&mut self, entry: SlotId) -> OrderHandle {
        dispatch!(self, order => order.on_insert(entry))
    }

    fn on_touch(&mut self, handle: OrderHandle) -> bool {
        dispatch!(self, order => order.on_touch(handle))
    }

    fn on_replace(&mut self, handle: OrderHandle) -> bool {
        dispatch!(self, order => order.on_replace(handle))
    }

    fn on_remove(&mut self, handle: OrderHandle) {
        dispatch!(self, order => order.on_remove(handle))
    }

    fn peek_victim(&self) -> Option<SlotId> {
        dispatch!(self, order => order.peek_victim())
    }

    fn evict_victim(&mut self) -> Option<SlotId> {
        dispatch!(self, order => order.evict_victim())
    }

    fn reset(&mut self) {
        dispatch!(self, order => order.reset())
    }

    fn len(&self) -> usize {
        dispatch!(self, order => order.len())
    }

    fn iter_order(&self) -> OrderIter<'_> {
        match self {
            Self::Lru(order) => OrderIter::Lru(order.iter_order()),
            Self::Mru(order) => OrderIter::Mru(order.iter_order()),
            Self::Lfu(order) => OrderIter::Lfu(order.iter_order()),
            Self::Fifo(order) => OrderIter::Fifo(order.iter_order()),
            Self::SecondChance(order) => OrderIter::SecondChance(order.iter_order()),
            Self::Random(order) => OrderIter::Random(order.iter_order()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn policy_names_round_trip() {
        for policy in EvictionPolicy::iter() {
            let name = policy.to_string();
            assert_eq!(name.parse::<EvictionPolicy>(), Ok(policy));
            assert_eq!(name.to_uppercase().parse::<EvictionPolicy>(), Ok(policy));
        }
        assert!("lru-k".parse::<EvictionPolicy>().is_err());
        assert_eq!(EvictionPolicy::default(), EvictionPolicy::Lru);
        let name: &'static str = EvictionPolicy::Fifo.into();
        assert_eq!(name, "fifo");
    }

    #[test]
    fn every_policy_tracks_membership() {
        for policy in EvictionPolicy::iter() {
            let mut index = PolicyIndex::new(policy, 4, Some(5));
            let handles: Vec<_> = (0..4).map(|i| index.on_insert(SlotId(i))).collect();
            assert_eq!(index.len(), 4, "{policy}");
            assert_eq!(index.iter_order().count(), 4, "{policy}");

            index.on_remove(handles[1]);
            assert_eq!(index.len(), 3, "{policy}");
            assert!(index.iter_order().all(|id| id != SlotId(1)), "{policy}");
            assert_ne!(index.peek_victim(), Some(SlotId(1)), "{policy}");
            index.debug_validate_invariants();

            index.reset();
            assert_eq!(index.peek_victim(), None, "{policy}");
        }
    }
}
