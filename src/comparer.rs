//! Key-equality strategies.
//!
//! The entry store never hashes or compares keys directly; it asks the
//! cache's [`KeyComparer`]. Two keys the comparer calls equal must produce the
//! same `hash_key`, exactly like `Eq` and `Hash`.
//!
//! | Comparer            | Keys                   | Equality                        |
//! |---------------------|------------------------|---------------------------------|
//! | [`NaturalKeys`]     | any `Eq + Hash`        | `==`                            |
//! | [`CaseInsensitive`] | any `AsRef<str>`       | Unicode lowercase folding       |

use std::hash::{BuildHasher, Hash, Hasher};

use rustc_hash::FxBuildHasher;

/// Equality and hashing strategy for cache keys.
///
/// # Example
///
/// ```
/// use evictcache::comparer::{CaseInsensitive, KeyComparer};
///
/// let cmp = CaseInsensitive;
/// assert!(cmp.keys_equal(&"Alpha", &"ALPHA"));
/// assert_eq!(cmp.hash_key(&"Alpha"), cmp.hash_key(&"alpha"));
/// ```
pub trait KeyComparer<K: ?Sized> {
    /// Hashes `key` consistently with [`keys_equal`](Self::keys_equal).
    fn hash_key(&self, key: &K) -> u64;

    /// Returns `true` if `a` and `b` identify the same entry.
    fn keys_equal(&self, a: &K, b: &K) -> bool;
}

/// Natural equality: `Eq` + `Hash` through the Fx hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalKeys;

impl<K> KeyComparer<K> for NaturalKeys
where
    K: Eq + Hash + ?Sized,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        FxBuildHasher.hash_one(key)
    }

    #[inline]
    fn keys_equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Case-insensitive equality for string-like keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl CaseInsensitive {
    fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars().flat_map(char::to_lowercase)
    }
}

impl<K> KeyComparer<K> for CaseInsensitive
where
    K: AsRef<str> + ?Sized,
{
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = FxBuildHasher.build_hasher();
        for c in Self::folded(key.as_ref()) {
            hasher.write_u32(c as u32);
        }
        hasher.finish()
    }

    fn keys_equal(&self, a: &K, b: &K) -> bool {
        Self::folded(a.as_ref()).eq(Self::folded(b.as_ref()))
    }
}
