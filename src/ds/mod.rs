//! Arena-backed building blocks shared by the eviction policies.
//!
//! - [`SlotArena`]: slot storage with stable [`SlotId`] handles.
//! - [`IntrusiveList`]: doubly linked list whose nodes live in a `SlotArena`.
//! - [`ClockRing`]: the CLOCK sweep, built on `IntrusiveList`.

pub mod clock_ring;
pub mod intrusive_list;
pub mod slot_arena;

pub use clock_ring::ClockRing;
pub use intrusive_list::{IntrusiveList, IntrusiveListIter, RingIter};
pub use slot_arena::{SlotArena, SlotId};
