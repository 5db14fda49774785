pub use crate::builder::CacheBuilder;
pub use crate::cache::{BoundedCache, SharedCache};
pub use crate::comparer::{CaseInsensitive, KeyComparer, NaturalKeys};
pub use crate::error::{CacheError, ConfigError, HandlerError};
pub use crate::events::{EvictionPhase, ListenerId};
pub use crate::legacy::{Cursor, ErasedCache};
pub use crate::policy::EvictionPolicy;
pub use crate::stats::CacheStats;
