//! Point-in-time accounting snapshot.

use std::fmt;

use crate::policy::EvictionPolicy;

/// Counters of one [`BoundedCache`](crate::BoundedCache), taken by
/// [`stats`](crate::BoundedCache::stats).
///
/// `total_touches` and `evictions` restart from zero on
/// [`clear`](crate::BoundedCache::clear); `policy` and `capacity` never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheStats {
    pub policy: EvictionPolicy,
    pub capacity: usize,
    pub len: usize,
    pub total_touches: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of capacity in use, in `0.0..=1.0`.
    pub fn fill_ratio(&self) -> f64 {
        self.len as f64 / self.capacity as f64
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} touches={} evictions={}",
            self.policy, self.len, self.capacity, self.total_touches, self.evictions
        )
    }
}
