//! Eviction notifications.
//!
//! A cache raises two events per capacity-triggered eviction, synchronously
//! and in registration order:
//!
//! ```text
//!   insert(new_key) on a full cache
//!     │
//!     ├─ victim = policy.evict_victim()
//!     ├─ Evicting(victim.key, victim.value)   victim still present
//!     ├─ remove victim from store and policy
//!     ├─ Evicted(victim.key, victim.value)    victim gone
//!     └─ insert new_key
//! ```
//!
//! Handlers get `&mut BoundedCache`, so they may read or mutate the cache
//! that is notifying them. A handler returning `Err` stops the insert; the
//! error surfaces as [`CacheError::Handler`](crate::error::CacheError::Handler).
//!
//! The handler list is snapshotted before each event is raised: a handler
//! that subscribes or unsubscribes takes effect from the next event.

use std::fmt;
use std::sync::Arc;

use strum::{Display, IntoStaticStr};

use crate::cache::BoundedCache;
use crate::error::HandlerError;

/// Which of the two eviction notifications is being raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum EvictionPhase {
    /// The victim is still in the cache.
    Evicting,
    /// The victim has been removed.
    Evicted,
}

/// Token returned by a subscription; pass it to
/// [`BoundedCache::unsubscribe`] to remove the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Shared eviction handler.
pub type EvictionHandler<K, V, C> =
    Arc<dyn Fn(&mut BoundedCache<K, V, C>, &K, &V) -> Result<(), HandlerError> + Send + Sync>;

/// Ordered handler lists for both phases.
pub(crate) struct Listeners<K, V, C> {
    evicting: Vec<(ListenerId, EvictionHandler<K, V, C>)>,
    evicted: Vec<(ListenerId, EvictionHandler<K, V, C>)>,
    next_id: u64,
}

impl<K, V, C> Listeners<K, V, C> {
    pub(crate) fn new() -> Self {
        Self {
            evicting: Vec::new(),
            evicted: Vec::new(),
            next_id: 0,
        }
    }

    fn phase(&self, phase: EvictionPhase) -> &[(ListenerId, EvictionHandler<K, V, C>)] {
        match phase {
            EvictionPhase::Evicting => &self.evicting,
            EvictionPhase::Evicted => &self.evicted,
        }
    }

    pub(crate) fn subscribe(
        &mut self,
        phase: EvictionPhase,
        handler: EvictionHandler<K, V, C>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let list = match phase {
            EvictionPhase::Evicting => &mut self.evicting,
            EvictionPhase::Evicted => &mut self.evicted,
        };
        list.push((id, handler));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.evicting.len() + self.evicted.len();
        self.evicting.retain(|(other, _)| *other != id);
        self.evicted.retain(|(other, _)| *other != id);
        before != self.evicting.len() + self.evicted.len()
    }

    /// Copies the current handlers for `phase`, in registration order.
    pub(crate) fn snapshot(&self, phase: EvictionPhase) -> Vec<EvictionHandler<K, V, C>> {
        self.phase(phase)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }

    pub(crate) fn count(&self, phase: EvictionPhase) -> usize {
        self.phase(phase).len()
    }
}

impl<K, V, C> fmt::Debug for Listeners<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("evicting", &self.evicting.len())
            .field("evicted", &self.evicted.len())
            .finish()
    }
}
