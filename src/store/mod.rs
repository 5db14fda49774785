//! Entry storage for [`BoundedCache`](crate::BoundedCache).

pub(crate) mod entries;

pub(crate) use entries::{Entry, EntryStore};
