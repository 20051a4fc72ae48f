//! Change-tracking hash map.

use std::borrow::Borrow;
use std::collections::hash_map::{self, RandomState};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops;

use tracing::trace;

use crate::iter::{DirtyEntries, DirtyKeys, DirtyValues, Iter};
use crate::shallow::{self, ShallowEq};

/// Hash map that records which keys were written since the last
/// [`reset`](Self::reset).
///
/// A [`set`](Self::set) marks its key dirty when the key appears, or when the
/// new value is not [`ShallowEq`] to the stored one. Once dirty, a key stays
/// dirty until [`reset`](Self::reset) or [`reset_key`](Self::reset_key), even
/// if it is written back to its original value. Old values are never kept.
///
/// Mutation needs `&mut self` and there is no internal locking. Callers that
/// share a map between threads wrap it in a `Mutex` or `RwLock`.
#[derive(Clone)]
pub struct TrackedMap<K, V, S = RandomState> {
    storage: HashMap<K, V, S>,
    dirty: HashSet<K, S>,
}

// ---------------------------------------------------------------------------
// Construction: default hasher
// ---------------------------------------------------------------------------

impl<K, V> TrackedMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty map with room for at least `capacity` entries.
    ///
    /// Only storage is pre-sized; the dirty set grows on demand.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

// ---------------------------------------------------------------------------
// Construction & accessors: no key bounds
// ---------------------------------------------------------------------------

impl<K, V, S: Clone> TrackedMap<K, V, S> {
    /// Creates an empty map using `hasher` for both storage and the dirty set.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates an empty map with the given capacity and hasher.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            dirty: HashSet::with_hasher(hasher.clone()),
            storage: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Seeds a map from `storage`. No key is marked dirty.
    ///
    /// The map takes ownership; clone first to keep a copy.
    #[must_use]
    pub fn from_map(storage: HashMap<K, V, S>) -> Self {
        Self {
            dirty: HashSet::with_hasher(storage.hasher().clone()),
            storage,
        }
    }
}

impl<K, V, S> TrackedMap<K, V, S> {
    /// Returns the number of key-value pairs in storage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if storage holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the number of dirty keys.
    #[must_use]
    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    /// Returns `true` if any key is dirty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the hasher shared by storage and the dirty set.
    #[must_use]
    pub fn hasher(&self) -> &S {
        self.storage.hasher()
    }

    /// Clears every dirty marker. Storage is left untouched.
    pub fn reset(&mut self) {
        let cleared = self.dirty.len();
        self.dirty.clear();
        if cleared > 0 {
            trace!(cleared, "dirty set reset");
        }
    }

    /// Returns an iterator over `(&K, &V)` pairs in storage.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.storage.iter())
    }

    /// Returns an iterator over the dirty keys, in unspecified order.
    ///
    /// Keys removed after becoming dirty are included.
    #[must_use]
    pub fn dirty_keys(&self) -> DirtyKeys<'_, K> {
        DirtyKeys::new(self.dirty.iter())
    }

    /// Consumes the map and returns its storage. Dirty markers are dropped.
    #[must_use]
    pub fn into_inner(self) -> HashMap<K, V, S> {
        self.storage
    }
}

// ---------------------------------------------------------------------------
// Read operations: K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> TrackedMap<K, V, S> {
    /// Returns a reference to the value stored at `key`.
    ///
    /// Reads never touch the dirty set.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.get(key)
    }

    /// Returns `true` if storage contains `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.contains_key(key)
    }

    /// Returns `true` if `key` is dirty.
    #[must_use]
    pub fn is_key_dirty<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dirty.contains(key)
    }

    /// Returns `true` if at least one of `keys` is dirty.
    ///
    /// Stops at the first dirty key. An empty `keys` yields `false`.
    #[must_use]
    pub fn is_any_dirty<'q, Q, I>(&self, keys: I) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().any(|key| self.dirty.contains(key))
    }

    /// Returns `(key, current value)` for every dirty key, in
    /// [`dirty_keys`](Self::dirty_keys) order.
    ///
    /// The value is `None` for keys removed after becoming dirty.
    #[must_use]
    pub fn dirty_entries(&self) -> DirtyEntries<'_, K, V, S> {
        DirtyEntries::new(self.dirty.iter(), &self.storage)
    }

    /// Returns the current values of dirty keys, in
    /// [`dirty_keys`](Self::dirty_keys) order.
    ///
    /// A key written several times shows only its latest value. Removed keys
    /// have no value and are skipped.
    #[must_use]
    pub fn dirty_values(&self) -> DirtyValues<'_, K, V, S> {
        DirtyValues::new(self.dirty_entries())
    }

    /// Clears the dirty marker of a single key. Returns `true` if it was set.
    pub fn reset_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let was_dirty = self.dirty.remove(key);
        if was_dirty {
            trace!(dirty = self.dirty.len(), "dirty key reset");
        }
        was_dirty
    }

    /// Removes `key` from storage and returns its value.
    ///
    /// Removing a present key flips its presence and marks it dirty. Removing
    /// an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (stored_key, old) = self.storage.remove_entry(key)?;
        if !self.dirty.contains(key) {
            self.dirty.insert(stored_key);
            trace!(dirty = self.dirty.len(), "key marked dirty by remove");
        }
        Some(old)
    }
}

// ---------------------------------------------------------------------------
// Snapshots: K: Clone, S: Clone
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> TrackedMap<K, V, S> {
    /// Returns a copy of the dirty set as `{key: true}`.
    ///
    /// Mutating the result does not affect the map.
    #[must_use]
    pub fn dirty(&self) -> HashMap<K, bool, S> {
        let mut out = HashMap::with_capacity_and_hasher(self.dirty.len(), self.hasher().clone());
        out.extend(self.dirty.iter().map(|key| (key.clone(), true)));
        out
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher + Clone> TrackedMap<K, V, S> {
    /// Returns a copy of storage restricted to dirty keys.
    ///
    /// Values are cloned, so `Rc`/`Arc` values still share their contents.
    /// Removed keys are absent from the result.
    #[must_use]
    pub fn dirty_slice(&self) -> HashMap<K, V, S> {
        let mut out = HashMap::with_capacity_and_hasher(self.dirty.len(), self.hasher().clone());
        out.extend(
            self.dirty_entries()
                .filter_map(|(key, value)| Some((key.clone(), value?.clone()))),
        );
        out
    }

    /// Returns [`dirty_slice`](Self::dirty_slice) and then resets.
    pub fn take_dirty_slice(&mut self) -> HashMap<K, V, S> {
        let slice = self.dirty_slice();
        self.reset();
        slice
    }
}

// ---------------------------------------------------------------------------
// Write operations: K: Hash + Eq + Clone, V: ShallowEq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V: ShallowEq, S: BuildHasher> TrackedMap<K, V, S> {
    /// Stores `value` at `key` and returns a reference to it.
    ///
    /// The key becomes dirty if it was absent, or if the stored value is not
    /// [`ShallowEq`] to `value`. An already dirty key stays dirty.
    pub fn set(&mut self, key: K, value: V) -> &V {
        if shallow::is_change(self.storage.get(&key), Some(&value)) && !self.dirty.contains(&key)
        {
            self.dirty.insert(key.clone());
            trace!(dirty = self.dirty.len(), "key marked dirty");
        }
        match self.storage.entry(key) {
            hash_map::Entry::Occupied(mut slot) => {
                slot.insert(value);
                slot.into_mut()
            }
            hash_map::Entry::Vacant(slot) => slot.insert(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: Default + Clone> Default for TrackedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for TrackedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedMap")
            .field("len", &self.storage.len())
            .field("dirty", &self.dirty.len())
            .finish_non_exhaustive()
    }
}

impl<K, V, S: Clone> From<HashMap<K, V, S>> for TrackedMap<K, V, S> {
    fn from(storage: HashMap<K, V, S>) -> Self {
        Self::from_map(storage)
    }
}

/// Writes go through [`TrackedMap::set`] and are tracked.
impl<K: Hash + Eq + Clone, V: ShallowEq, S: BuildHasher> Extend<(K, V)> for TrackedMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

/// Collecting seeds the map; nothing is dirty afterwards.
impl<K: Hash + Eq, V, S: BuildHasher + Default + Clone> FromIterator<(K, V)>
    for TrackedMap<K, V, S>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<K, Q, V, S> ops::Index<&Q> for TrackedMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, S> IntoIterator for &'a TrackedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
