//! OrderedMap: parallel key/value vectors with insertion-ordered entries.

use crate::error::{IndexError, IndexResult};
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use log::trace;

/// A single `{ key, value }` record, as produced by [`OrderedMap::to_array`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair<K, V> {
    pub key: K,
    pub value: V,
}

/// Insertion-ordered map backed by two parallel vectors.
///
/// `keys[i]` is bound to `values[i]` for every valid `i`, and no two keys
/// compare equal. Key lookups are linear scans using `K: Eq`; positional
/// reads are O(1).
#[derive(Clone, PartialEq, Eq)]
pub struct OrderedMap<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Resolve a signed slice bound: negative values count back from `len`,
/// everything clamps to `[0, len]`.
fn clamp_bound(bound: isize, len: usize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        (bound as usize).min(len)
    }
}

impl<K, V> OrderedMap<K, V> {
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.keys.reserve(additional);
        self.values.reserve(additional);
    }

    pub fn clear(&mut self) {
        trace!("ordered map: clear {} entries", self.keys.len());
        self.keys.clear();
        self.values.clear();
    }

    /// Value at position `index`.
    pub fn at(&self, index: usize) -> IndexResult<&V> {
        let len = self.len();
        self.values
            .get(index)
            .ok_or(IndexError::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> IndexResult<&mut V> {
        let len = self.len();
        self.values
            .get_mut(index)
            .ok_or(IndexError::OutOfRange { index, len })
    }

    /// Key at position `index`.
    pub fn key(&self, index: usize) -> IndexResult<&K> {
        let len = self.len();
        self.keys
            .get(index)
            .ok_or(IndexError::OutOfRange { index, len })
    }

    pub fn first(&self) -> IndexResult<&V> {
        self.values.first().ok_or(IndexError::Empty)
    }

    pub fn last(&self) -> IndexResult<&V> {
        self.values.last().ok_or(IndexError::Empty)
    }

    /// Invoke `f(value, key, index)` for every entry in order.
    pub fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&V, &K, usize),
    {
        for (i, (k, v)) in self.keys.iter().zip(self.values.iter()).enumerate() {
            f(v, k, i);
        }
        self
    }

    /// New map with the same keys, each value replaced by `f(value, key, index)`.
    pub fn map<U, F>(&self, mut f: F) -> OrderedMap<K, U>
    where
        K: Clone,
        F: FnMut(&V, &K, usize) -> U,
    {
        let values = self
            .keys
            .iter()
            .zip(self.values.iter())
            .enumerate()
            .map(|(i, (k, v))| f(v, k, i))
            .collect();
        OrderedMap {
            keys: self.keys.clone(),
            values,
        }
    }

    /// New map holding the entries for which `f(value, key, index)` is true.
    pub fn select<F>(&self, mut f: F) -> Self
    where
        K: Clone,
        V: Clone,
        F: FnMut(&V, &K, usize) -> bool,
    {
        let mut out = Self::new();
        for (i, (k, v)) in self.keys.iter().zip(self.values.iter()).enumerate() {
            if f(v, k, i) {
                out.keys.push(k.clone());
                out.values.push(v.clone());
            }
        }
        out
    }

    /// New map with entries stably sorted by `compare`.
    pub fn sort<F>(&self, mut compare: F) -> Self
    where
        K: Clone,
        V: Clone,
        F: FnMut((&K, &V), (&K, &V)) -> Ordering,
    {
        let mut order: Vec<usize> = (0..self.len()).collect();
        // `sort_by` is stable, so equal entries keep their relative order.
        order.sort_by(|&a, &b| {
            compare(
                (&self.keys[a], &self.values[a]),
                (&self.keys[b], &self.values[b]),
            )
        });
        self.gather(order)
    }

    pub fn sort_by_key<T, F>(&self, mut f: F) -> Self
    where
        K: Clone,
        V: Clone,
        T: Ord,
        F: FnMut(&K, &V) -> T,
    {
        self.sort(|a, b| {
            let ka = f(a.0, a.1);
            let kb = f(b.0, b.1);
            ka.cmp(&kb)
        })
    }

    /// Entries with positions in `[start, end)`, using slice clamping:
    /// negative bounds count from the end, out-of-range bounds clamp.
    pub fn range(&self, start: isize, end: isize) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let len = self.len();
        let (s, e) = (clamp_bound(start, len), clamp_bound(end, len));
        if s >= e {
            return Self::new();
        }
        Self {
            keys: self.keys[s..e].to_vec(),
            values: self.values[s..e].to_vec(),
        }
    }

    /// Entries from `index` to the end; same clamping as [`range`](Self::range).
    pub fn rest(&self, index: isize) -> Self
    where
        K: Clone,
        V: Clone,
    {
        self.range(index, isize::MAX)
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys.clone()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values.clone()
    }

    pub fn into_keys(self) -> Vec<K> {
        self.keys
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }

    pub fn to_array(&self) -> Vec<Pair<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(k, v)| Pair {
                key: k.clone(),
                value: v.clone(),
            })
            .collect()
    }

    pub fn into_array(self) -> Vec<Pair<K, V>> {
        self.into_iter()
            .map(|(key, value)| Pair { key, value })
            .collect()
    }

    fn gather<I>(&self, positions: I) -> Self
    where
        K: Clone,
        V: Clone,
        I: IntoIterator<Item = usize>,
    {
        let mut out = Self::with_capacity(self.len());
        for i in positions {
            out.keys.push(self.keys[i].clone());
            out.values.push(self.values[i].clone());
        }
        out
    }

    #[inline]
    pub(crate) fn debug_check(&self) {
        debug_assert_eq!(
            self.keys.len(),
            self.values.len(),
            "keys/values length mismatch"
        );
    }
}

impl<K: Eq, V> OrderedMap<K, V> {
    fn position<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.keys.iter().position(|k| k.borrow() == q)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key).map(|i| &self.values[i])
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(key)?;
        Some(&mut self.values[i])
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key).is_some()
    }

    /// Position of `key`, or `None` when absent.
    pub fn index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key)
    }

    /// Overwrite the value bound to `key` in place, or append a new entry.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        match self.position(&key) {
            Some(i) => {
                trace!("ordered map: overwrite entry at {}", i);
                self.values[i] = value;
            }
            None => {
                trace!("ordered map: append entry at {}", self.keys.len());
                self.keys.push(key);
                self.values.push(value);
            }
        }
        self.debug_check();
        self
    }

    /// Remove `key` if present. Missing keys are a no-op.
    pub fn del<Q>(&mut self, key: &Q) -> &mut Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let _ = self.remove(key);
        self
    }

    /// Remove `key` and hand back the evicted entry.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(key)?;
        trace!("ordered map: remove entry at {}", i);
        let k = self.keys.remove(i);
        let v = self.values.remove(i);
        self.debug_check();
        Some((k, v))
    }
}

impl<K: Eq, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Eq, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Eq, V> From<Vec<(K, V)>> for OrderedMap<K, V> {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn abc() -> OrderedMap<&'static str, i32> {
        OrderedMap::from([("a", 1), ("b", 2), ("c", 3)])
    }

    /// Invariant: Construction keeps source order; duplicate source keys keep
    /// their first position and last value.
    #[test]
    fn construction_preserves_order_and_dedups() {
        let m = OrderedMap::from(vec![("x", 1), ("y", 2), ("x", 3)]);
        assert_eq!(m.keys(), vec!["x", "y"]);
        assert_eq!(m.values(), vec![3, 2]);

        let empty: OrderedMap<String, i32> = OrderedMap::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }

    /// Invariant: Key lookups return `None` on a miss and never fail.
    #[test]
    fn lookup_sentinels() {
        let m = abc();
        assert_eq!(m.get("b"), Some(&2));
        assert_eq!(m.get("z"), None);
        assert!(m.has("a"));
        assert!(!m.has("z"));
        assert_eq!(m.index("c"), Some(2));
        assert_eq!(m.index("z"), None);
    }

    /// Invariant: Borrowed lookup works (store `String`, query with `&str`).
    #[test]
    fn borrowed_lookup_with_str() {
        let mut m: OrderedMap<String, i32> = OrderedMap::new();
        m.set("hello".to_string(), 1);
        assert!(m.has("hello"));
        assert_eq!(m.get("hello"), Some(&1));
        m.del("hello");
        assert!(m.is_empty());
    }

    /// Invariant: Positional reads report out-of-range and empty uniformly.
    #[test]
    fn positional_access_errors() {
        let m = abc();
        assert_eq!(m.at(0), Ok(&1));
        assert_eq!(m.key(2), Ok(&"c"));
        assert_eq!(m.at(3), Err(IndexError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(m.key(9), Err(IndexError::OutOfRange { index: 9, len: 3 }));
        assert_eq!(m.first(), Ok(&1));
        assert_eq!(m.last(), Ok(&3));

        let empty: OrderedMap<&str, i32> = OrderedMap::new();
        assert_eq!(empty.first(), Err(IndexError::Empty));
        assert_eq!(empty.last(), Err(IndexError::Empty));
    }

    /// Invariant: `set` on an existing key overwrites in place; on a new key
    /// appends. Applying the same `set` twice equals applying it once.
    #[test]
    fn set_overwrites_or_appends() {
        let mut m = abc();
        m.set("b", 20);
        assert_eq!(m.keys(), vec!["a", "b", "c"]);
        assert_eq!(m.at(1), Ok(&20));

        m.set("d", 4).set("d", 4);
        assert_eq!(m.keys(), vec!["a", "b", "c", "d"]);
        assert_eq!(m.last(), Ok(&4));
    }

    /// Invariant: `del` removes exactly one entry, keeps the rest in order, and
    /// is a no-op on a missing key.
    #[test]
    fn del_preserves_remaining_order() {
        let mut m = abc();
        m.del("b");
        assert_eq!(m.keys(), vec!["a", "c"]);
        assert_eq!(m.values(), vec![1, 3]);

        m.del("zzz");
        assert_eq!(m.len(), 2);

        assert_eq!(m.remove("a"), Some(("a", 1)));
        assert_eq!(m.remove("a"), None);
    }

    /// Invariant: Slicing clamps like standard sequence slicing.
    #[test]
    fn range_and_rest_clamp() {
        let m = abc();
        assert_eq!(m.range(1, 3).keys(), vec!["b", "c"]);
        assert_eq!(m.range(-2, 100).keys(), vec!["b", "c"]);
        assert_eq!(m.range(0, -1).keys(), vec!["a", "b"]);
        assert_eq!(m.range(-100, 1).keys(), vec!["a"]);
        assert!(m.range(2, 1).is_empty());
        assert!(m.range(5, 9).is_empty());
        assert_eq!(m.rest(1).values(), vec![2, 3]);
        assert_eq!(m.rest(-1).keys(), vec!["c"]);
        assert!(m.rest(3).is_empty());
    }

    /// Invariant: `each` visits entries in order with `(value, key, index)`.
    #[test]
    fn each_visits_in_order() {
        let m = abc();
        let mut seen = Vec::new();
        let r = m.each(|v, k, i| seen.push((*k, *v, i)));
        assert_eq!(r.len(), 3);
        assert_eq!(seen, vec![("a", 1, 0), ("b", 2, 1), ("c", 3, 2)]);
    }

    /// Invariant: `map` keeps keys and order; `select` keeps relative order.
    #[test]
    fn map_and_select() {
        let m = abc();
        let doubled = m.map(|v, _, _| v * 10);
        assert_eq!(doubled.values(), vec![10, 20, 30]);
        assert_eq!(doubled.keys(), m.keys());

        let labelled = m.map(|v, k, i| format!("{k}{v}@{i}"));
        assert_eq!(labelled.get("c").map(String::as_str), Some("c3@2"));

        let odd = m.select(|v, _, _| v % 2 == 1);
        assert_eq!(odd.keys(), vec!["a", "c"]);
    }

    /// Invariant: `sort` is stable and leaves the source untouched.
    #[test]
    fn sort_is_stable() {
        let m = OrderedMap::from([("a", 2), ("b", 1), ("c", 2), ("d", 1)]);
        let sorted = m.sort(|a, b| a.1.cmp(b.1));
        assert_eq!(sorted.keys(), vec!["b", "d", "a", "c"]);
        assert_eq!(m.keys(), vec!["a", "b", "c", "d"]);

        let desc = m.sort_by_key(|k, _| core::cmp::Reverse(*k));
        assert_eq!(desc.keys(), vec!["d", "c", "b", "a"]);
    }

    /// Invariant: Sorting an empty map never calls the comparator.
    #[test]
    fn sort_empty_never_calls_comparator() {
        let calls = Cell::new(0);
        let m: OrderedMap<i32, i32> = OrderedMap::new();
        let s = m.sort(|_, _| {
            calls.set(calls.get() + 1);
            Ordering::Equal
        });
        assert!(s.is_empty());
        assert_eq!(calls.get(), 0);
    }

    /// Invariant: Derived maps never alias the source's storage.
    #[test]
    fn derived_maps_are_independent() {
        let mut m = abc();
        let c = m.clone();
        let r = m.rest(0);
        m.set("a", 100).del("c");
        assert_eq!(c.values(), vec![1, 2, 3]);
        assert_eq!(r.values(), vec![1, 2, 3]);
        assert_eq!(c.to_array(), abc().to_array());
    }

    /// Invariant: `to_array` mirrors current order as `{ key, value }` records.
    #[test]
    fn to_array_records() {
        let mut m = OrderedMap::from([("a", 1)]);
        m.set("b", 2).del("a");
        assert_eq!(m.to_array(), vec![Pair { key: "b", value: 2 }]);
        assert_eq!(m.into_array(), vec![Pair { key: "b", value: 2 }]);
    }

    /// Invariant: `get_mut`/`at_mut` mutate values without touching order.
    #[test]
    fn mutable_value_access() {
        let mut m = abc();
        *m.get_mut("a").unwrap() += 10;
        *m.at_mut(2).unwrap() += 30;
        assert_eq!(m.values(), vec![11, 2, 33]);
        assert!(m.at_mut(3).is_err());
        assert!(m.get_mut("z").is_none());
    }

    #[test]
    fn debug_formats_as_map() {
        let m = OrderedMap::from([("b", 2), ("a", 1)]);
        assert_eq!(format!("{m:?}"), r#"{"b": 2, "a": 1}"#);
    }

    #[test]
    fn clear_and_reuse() {
        let mut m = abc();
        m.clear();
        assert!(m.is_empty());
        m.set("z", 26);
        assert_eq!(m.first(), Ok(&26));
    }
}
