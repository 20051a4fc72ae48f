//! The full clean/dirty/reset lifecycle with mixed value types.

use std::collections::{HashMap, HashSet};

use tracked_map::{ShallowEq, TrackedMap};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Scalar {
    Int(i64),
    Str(&'static str),
}

impl ShallowEq for Scalar {
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

fn seeded() -> TrackedMap<&'static str, Scalar> {
    TrackedMap::from_map(HashMap::from([("a", Scalar::Int(1))]))
}

#[test]
fn unwritten_keys_are_clean() {
    let map = seeded();
    assert!(!map.is_key_dirty("a"));
    assert_eq!(map.get("a"), Some(&Scalar::Int(1)));
    assert!(!map.is_key_dirty("b"));
    assert_eq!(map.get("b"), None);
}

#[test]
fn lifecycle() {
    let mut map = seeded();

    map.set("a", Scalar::Int(1));
    assert!(!map.is_key_dirty("a"), "same value is not a change");
    assert!(!map.is_dirty());

    map.set("b", Scalar::Int(2));
    assert!(map.is_dirty());
    assert_eq!(map.dirty_keys().copied().collect::<HashSet<_>>(), HashSet::from(["b"]));

    map.set("a", Scalar::Str("hello"));
    assert_eq!(
        map.dirty_keys().copied().collect::<HashSet<_>>(),
        HashSet::from(["a", "b"])
    );
    assert_eq!(
        map.dirty_values().cloned().collect::<HashSet<_>>(),
        HashSet::from([Scalar::Str("hello"), Scalar::Int(2)])
    );
    assert_eq!(map.dirty(), HashMap::from([("a", true), ("b", true)]));
    assert!(map.is_any_dirty(["zz", "a"]));

    map.reset();
    assert!(!map.is_dirty());
    assert!(!map.is_any_dirty(["a", "b"]));
    assert_eq!(map.get("a"), Some(&Scalar::Str("hello")));

    map.set("c", Scalar::Int(3));
    assert!(map.is_dirty());
    assert_eq!(map.dirty_keys().copied().collect::<Vec<_>>(), vec!["c"]);
    assert_eq!(map.dirty_slice(), HashMap::from([("c", Scalar::Int(3))]));
}

#[test]
fn returned_snapshots_do_not_leak_back() {
    let mut map = seeded();
    map.set("c", Scalar::Int(3));

    let mut dirty = map.dirty();
    dirty.clear();
    let mut slice = map.dirty_slice();
    slice.insert("c", Scalar::Int(99));

    assert_eq!(map.dirty(), HashMap::from([("c", true)]));
    assert_eq!(map.dirty_slice(), HashMap::from([("c", Scalar::Int(3))]));
}
