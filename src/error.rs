//! Error types for the evictcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. zero capacity).
//! - [`CacheError`]: Returned by cache operations: missing keys, stale
//!   cursors, mistyped erased access, and failures raised by eviction
//!   listeners.
//!
//! ## Example Usage
//!
//! ```
//! use evictcache::error::ConfigError;
//! use evictcache::{BoundedCache, EvictionPolicy};
//!
//! let cache: Result<BoundedCache<u32, &str>, ConfigError> =
//!     BoundedCache::try_new(16, EvictionPolicy::Lru);
//! assert!(cache.is_ok());
//!
//! let bad = BoundedCache::<u32, &str>::try_new(0, EvictionPolicy::Lru);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

use crate::events::EvictionPhase;

/// Boxed error produced by an eviction listener.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`BoundedCache::try_new`](crate::BoundedCache::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use evictcache::{BoundedCache, EvictionPolicy};
///
/// let err = BoundedCache::<u64, u64>::try_new(0, EvictionPolicy::Fifo).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Errors reported by cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A strict lookup (`fetch`, `touch_or_err`) found no entry for the key.
    #[error("key not found in cache")]
    KeyNotFound,

    /// A [`Cursor`](crate::legacy::Cursor) was advanced after the cache's
    /// membership or enumeration order changed.
    #[error("cache was modified during enumeration")]
    ConcurrentModification,

    /// The erased adapter received a key or value of the wrong type.
    #[error("expected {role} of type `{expected}`")]
    TypeMismatch {
        role: &'static str,
        expected: &'static str,
    },

    /// An eviction listener failed; the listener's error is the source.
    #[error("{phase} listener failed")]
    Handler {
        phase: EvictionPhase,
        #[source]
        source: HandlerError,
    },

    /// Bulk construction was given an invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CacheError {
    /// Returns the listener error if this is a [`CacheError::Handler`].
    pub fn handler_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Handler { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
