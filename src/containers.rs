//! Guarded container wrappers
//!
//! [`FrozenSeq`] and [`FrozenMap`] are the crate's immutable-construction
//! factories: read-only views produced by a non-mutating construction path.
//! The wrapper type itself is the capability marker — any instance of these
//! types reports the immutability guarantee when reflected, while plain
//! growable containers (`Vec`, `HashMap`, ...) never do. This replaces
//! instance-identity sniffing with a type-level tag.
//!
//! Both wrappers share their backing storage on clone (`Arc`), so passing
//! them around is cheap and cannot introduce a mutation path.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A read-only sequence with an immutability guarantee.
///
/// Construct one from any iterator or `Vec`; once built, elements can be
/// read but never added, removed or replaced.
pub struct FrozenSeq<T> {
    items: Arc<[T]>,
}

impl<T> FrozenSeq<T> {
    /// Freeze a vector of elements into a read-only sequence.
    pub fn new(items: Vec<T>) -> Self {
        FrozenSeq {
            items: items.into(),
        }
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Element at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for FrozenSeq<T> {
    fn clone(&self) -> Self {
        FrozenSeq {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FrozenSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for FrozenSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for FrozenSeq<T> {}

impl<T> From<Vec<T>> for FrozenSeq<T> {
    fn from(items: Vec<T>) -> Self {
        FrozenSeq::new(items)
    }
}

impl<T> FromIterator<T> for FrozenSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FrozenSeq {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a FrozenSeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A read-only map with an immutability guarantee.
///
/// Backed by a `BTreeMap`, so iteration order is deterministic (and so is
/// the entry numbering in failure paths).
pub struct FrozenMap<K, V> {
    entries: Arc<BTreeMap<K, V>>,
}

impl<K: Ord, V> FrozenMap<K, V> {
    /// Freeze a map into a read-only view.
    pub fn new(entries: BTreeMap<K, V>) -> Self {
        FrozenMap {
            entries: Arc::new(entries),
        }
    }

    /// Value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Clone for FrozenMap<K, V> {
    fn clone(&self) -> Self {
        FrozenMap {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for FrozenMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for FrozenMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for FrozenMap<K, V> {}

impl<K: Ord, V> From<BTreeMap<K, V>> for FrozenMap<K, V> {
    fn from(entries: BTreeMap<K, V>) -> Self {
        FrozenMap::new(entries)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for FrozenMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FrozenMap {
            entries: Arc::new(iter.into_iter().collect()),
        }
    }
}
