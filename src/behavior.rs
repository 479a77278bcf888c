//! Caller-supplied payload behavior: hashing, equality and release.
//!
//! The table never inspects payloads itself. Every placement, comparison
//! and destruction goes through a `Behavior` implementation chosen at
//! construction time.

use core::cmp::Ordering;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Payload capabilities required by `FrequencyTable`.
///
/// `hash` must return the same value for payloads that `equals` considers
/// equal, and `equals` must be an equivalence relation. Collisions are
/// allowed; they only lengthen chains.
pub trait Behavior<T: ?Sized> {
    fn hash(&self, payload: &T) -> u64;

    fn equals(&self, a: &T, b: &T) -> bool;

    /// Called exactly once for every payload the table owns, when the
    /// table is dropped. Rejected duplicates are never passed here.
    fn destroy(&self, payload: &mut T) {
        let _ = payload;
    }
}

/// `Hash + Eq` behavior driven by a `BuildHasher`.
#[derive(Debug, Clone, Default)]
pub struct DefaultBehavior<S = DefaultHashBuilder> {
    hasher: S,
}

impl<S> DefaultBehavior<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<T, S> Behavior<T> for DefaultBehavior<S>
where
    T: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, payload: &T) -> u64 {
        self.hasher.hash_one(payload)
    }

    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

enum Comparator<T: ?Sized> {
    Equals(fn(&T, &T) -> bool),
    Ordering(fn(&T, &T) -> Ordering),
}

impl<T: ?Sized> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Comparator<T> {}

/// Behavior assembled from plain function pointers.
///
/// The comparator may be boolean or three-way; with a three-way
/// comparator only `Ordering::Equal` is meaningful to the table.
pub struct FnBehavior<T: ?Sized> {
    hash: fn(&T) -> u64,
    compare: Comparator<T>,
    destroy: Option<fn(&mut T)>,
}

impl<T: ?Sized> Clone for FnBehavior<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for FnBehavior<T> {}

impl<T: ?Sized> FnBehavior<T> {
    pub fn new(hash: fn(&T) -> u64, equals: fn(&T, &T) -> bool) -> Self {
        Self {
            hash,
            compare: Comparator::Equals(equals),
            destroy: None,
        }
    }

    pub fn from_compare(hash: fn(&T) -> u64, compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            hash,
            compare: Comparator::Ordering(compare),
            destroy: None,
        }
    }

    pub fn with_destroy(mut self, destroy: fn(&mut T)) -> Self {
        self.destroy = Some(destroy);
        self
    }
}

impl<T: ?Sized> Behavior<T> for FnBehavior<T> {
    #[inline]
    fn hash(&self, payload: &T) -> u64 {
        (self.hash)(payload)
    }

    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        match self.compare {
            Comparator::Equals(eq) => eq(a, b),
            Comparator::Ordering(cmp) => cmp(a, b) == Ordering::Equal,
        }
    }

    fn destroy(&self, payload: &mut T) {
        if let Some(destroy) = self.destroy {
            destroy(payload);
        }
    }
}
