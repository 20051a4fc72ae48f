//! Shallow equality: the comparison that decides dirtiness.
//!
//! Scalars, strings included, compare by value. Shared pointers compare by
//! identity: two [`Rc`]s are equal only when they point at the same
//! allocation, no matter what the allocations contain. Nothing here recurses
//! into contents.
//!
//! Owned composite values (`Vec`, plain structs) have no identity to compare
//! and have no impl. Store them behind [`Rc`] or [`Arc`], or
//! implement [`ShallowEq`] for your own type.

use std::rc::{self, Rc};
use std::sync::{self, Arc};

/// Equality that never inspects the contents of composite values.
pub trait ShallowEq {
    /// Returns `true` if `self` and `other` are shallowly equal.
    fn shallow_eq(&self, other: &Self) -> bool;
}

macro_rules! shallow_eq_by_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShallowEq for $t {
                #[inline]
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

shallow_eq_by_value!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, (), String, str,
    Box<str>,
);

// IEEE `==`: NaN is never equal to itself.
#[allow(clippy::float_cmp)]
impl ShallowEq for f32 {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

#[allow(clippy::float_cmp)]
impl ShallowEq for f64 {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl ShallowEq for &str {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for Arc<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for rc::Weak<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ?Sized> ShallowEq for sync::Weak<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Decides whether a write from `old` to `new` is a change.
///
/// A change is a presence flip (exactly one side absent) or two present
/// values that are not [`ShallowEq`].
#[must_use]
pub fn is_change<V: ShallowEq + ?Sized>(old: Option<&V>, new: Option<&V>) -> bool {
    match (old, new) {
        (Some(a), Some(b)) => !a.shallow_eq(b),
        (None, None) => false,
        _ => true,
    }
}
