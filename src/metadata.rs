// Copyright 2025 Cowboy AI, LLC.

//! The metadata contract carried through result trees

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// A value attached to a result to explain its outcome
///
/// Metadata is deduplicated by equality and hashing, so two causes yielding
/// the same value contribute it once to the aggregate. Text metadata doubles
/// as the human-readable assertion; any other type falls back to the owning
/// proposition's statement (or its negation) for the assertion text.
///
/// Types with a natural order report it through [`natural_order`], and the
/// metadata sets of a result tree are then kept sorted. Types that return
/// `None` keep first-seen order.
///
/// [`natural_order`]: Metadata::natural_order
pub trait Metadata: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Human-readable assertion carried by this value, if it has one
    fn assertion(&self) -> Option<String> {
        None
    }

    /// Build a default value from an assertion, used when a branch is left unset
    fn from_assertion(_assertion: &str) -> Option<Self> {
        None
    }

    /// Natural order relative to `other`, if the type has one
    fn natural_order(&self, _other: &Self) -> Option<Ordering> {
        None
    }
}

impl Metadata for String {
    fn assertion(&self) -> Option<String> {
        Some(self.clone())
    }

    fn from_assertion(assertion: &str) -> Option<Self> {
        Some(assertion.to_string())
    }

    fn natural_order(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Metadata for &'static str {
    fn assertion(&self) -> Option<String> {
        Some((*self).to_string())
    }

    fn natural_order(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! ordered_metadata {
    ($($ty:ty),* $(,)?) => {
        $(impl Metadata for $ty {
            fn natural_order(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        })*
    };
}

ordered_metadata!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, ());
