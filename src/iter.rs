//! Iterator types for tracked maps.

use std::collections::{HashMap, hash_map, hash_set};
use std::hash::{BuildHasher, Hash};

/// Iterator over references to key-value pairs in a [`TrackedMap`](crate::TrackedMap).
pub struct Iter<'a, K, V> {
    inner: hash_map::Iter<'a, K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) const fn new(inner: hash_map::Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over the currently dirty keys.
///
/// Includes keys that were removed from storage after becoming dirty.
pub struct DirtyKeys<'a, K> {
    inner: hash_set::Iter<'a, K>,
}

impl<'a, K> DirtyKeys<'a, K> {
    pub(crate) const fn new(inner: hash_set::Iter<'a, K>) -> Self {
        Self { inner }
    }
}

impl<'a, K> Iterator for DirtyKeys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for DirtyKeys<'_, K> {}

/// Iterator over `(key, current value)` for every dirty key.
///
/// The value is `None` when the key was removed after becoming dirty.
pub struct DirtyEntries<'a, K, V, S> {
    keys: hash_set::Iter<'a, K>,
    storage: &'a HashMap<K, V, S>,
}

impl<'a, K, V, S> DirtyEntries<'a, K, V, S> {
    pub(crate) const fn new(keys: hash_set::Iter<'a, K>, storage: &'a HashMap<K, V, S>) -> Self {
        Self { keys, storage }
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Iterator for DirtyEntries<'a, K, V, S> {
    type Item = (&'a K, Option<&'a V>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some((key, self.storage.get(key)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ExactSizeIterator for DirtyEntries<'_, K, V, S> {}

/// Iterator over the current values of dirty keys, in
/// [`DirtyKeys`] order.
///
/// These are present-day values, not the values at the time the key became
/// dirty. Dirty keys with no value in storage are skipped.
pub struct DirtyValues<'a, K, V, S> {
    entries: DirtyEntries<'a, K, V, S>,
}

impl<'a, K, V, S> DirtyValues<'a, K, V, S> {
    pub(crate) const fn new(entries: DirtyEntries<'a, K, V, S>) -> Self {
        Self { entries }
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Iterator for DirtyValues<'a, K, V, S> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.find_map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}
