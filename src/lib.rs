//! Change-tracking hash map.
//!
//! [`TrackedMap`] is a key/value map that remembers which keys were written
//! since the last [`reset`](TrackedMap::reset), so a caller can persist only
//! what changed. It keeps no old values and never compares deeply.
//!
//! # Key properties
//!
//! - **Shallow dirtiness**: a write is a change when the key appears, or when
//!   the new value is not [`ShallowEq`] to the stored one. Scalars compare by
//!   value, `Rc`/`Arc` by identity.
//! - **Sticky markers**: only `reset` clears dirtiness. Writing a key back to
//!   its original value leaves it dirty.
//! - **Seeding is not a mutation**: maps built from a `HashMap` or an
//!   iterator start clean.
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use tracked_map::TrackedMap;
//!
//! let mut row = TrackedMap::from_map(HashMap::from([("id", 7), ("age", 41)]));
//! row.set("id", 7);
//! assert!(!row.is_dirty());
//!
//! row.set("age", 42);
//! assert!(row.is_key_dirty("age"));
//! assert_eq!(row.dirty_slice(), HashMap::from([("age", 42)]));
//!
//! row.reset();
//! assert!(!row.is_dirty());
//! assert_eq!(row.get("age"), Some(&42));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod iter;
pub mod shallow;

mod map;
#[cfg(feature = "serde")]
mod serde_impl;


pub use map::TrackedMap;
pub use shallow::ShallowEq;
