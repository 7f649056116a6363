//! Set algebra between two `OrderedMap`s, keyed on key membership.

use crate::ordered_map::OrderedMap;

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    /// Entries whose key is present in both maps.
    ///
    /// The smaller map drives the scan (the receiver on a tie) and supplies
    /// both the order and the values of the result.
    pub fn intersect(&self, other: &Self) -> Self {
        let (driver, probe) = if other.len() < self.len() {
            (other, self)
        } else {
            (self, other)
        };
        driver.select(|_, k, _| probe.has(k))
    }

    /// Receiver entries followed by the entries of `other` whose key the
    /// receiver lacks. The receiver's value wins on collision.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.reserve(other.len());
        for (k, v) in other.iter() {
            if !self.has(k) {
                out.keys.push(k.clone());
                out.values.push(v.clone());
            }
        }
        out.debug_check();
        out
    }

    /// Receiver entries whose key does not appear in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.select(|_, k, _| !other.has(k))
    }
}
