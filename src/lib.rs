//! ordered-hash: an insertion-ordered key/value map with positional
//! access, slicing, functional transforms and set algebra.
//!
//! Internal Design:
//!
//! Summary
//! - Representation: two parallel vectors, `keys` and `values`, where
//!   `keys[i]` is bound to `values[i]`. Every operation is a pass over
//!   this pair; there is no hashing index.
//! - Layers:
//!   - `OrderedMap<K, V>`: storage, lookup, mutation, slicing and the
//!     closure-based combinators (`each`, `map`, `select`, `sort`).
//!   - `set_ops`: `intersect`/`union`/`difference` built on key membership.
//!   - `iter`: borrowing and owning iterators over entries.
//!   - `serde_impl` (feature `serde`): map-shaped (de)serialization and
//!     `to_json`.
//!
//! Constraints
//! - Keys need `Eq` only. Lookups are linear; positional reads are O(1).
//! - Keys are unique at all times. Every path that adds entries
//!   (`set`, `extend`, `collect`, deserialization) overwrites in place on
//!   a repeated key, so a duplicate keeps its first position and its last
//!   value.
//! - `keys.len() == values.len()` is checked with `debug_assert!` after
//!   each mutation; it is never reported as a runtime error.
//! - Derived maps (`clone`, `range`, `rest`, `map`, `select`, `sort` and
//!   the set operations) own fresh vectors and never alias the source.
//!
//! Failure model
//! - Key misses are not errors: `get`/`get_mut`/`index` return `None`,
//!   `has` returns `false`, `del` is a no-op.
//! - Positional reads (`at`, `at_mut`, `key`, `first`, `last`) return
//!   `IndexResult`, with `IndexError::OutOfRange` for a bad index and
//!   `IndexError::Empty` for `first`/`last` on an empty map.
//! - `range`/`rest` take signed bounds (negative counts from the end) and
//!   clamp them to `[0, len]`, so they have no failure case.
//!
//! Notes and non-goals
//! - No internal synchronization. The map is as `Send`/`Sync` as its
//!   contents; shared mutation needs external locking.
//! - Structural mutations emit `log::trace!` records; reads are silent.
//! - Keys are immutable post-insert; `iter_mut` hands out `&mut V` only.

mod error;
mod iter;
mod ordered_map;
mod ordered_map_proptest;
#[cfg(feature = "serde")]
mod serde_impl;
mod set_ops;

// Public surface
pub use error::{IndexError, IndexResult};
pub use iter::{IntoIter, Iter, IterMut};
pub use ordered_map::{OrderedMap, Pair};
