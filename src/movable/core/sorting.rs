//! Canonical ordering of movable collections.
//!
//! Every read of a collection and every reorder check uses this ordering:
//! ascending by position, ties broken by identifier. Missing values sort
//! first, the same way an unpositioned item would appear at the top of a
//! list.

use std::cmp::Ordering;

use super::entity::Movable;

/// Compare two items by position, then by identifier.
pub fn compare_movable<T: Movable>(a: &T, b: &T) -> Ordering {
    a.position()
        .cmp(&b.position())
        .then_with(|| a.id().cmp(&b.id()))
}

/// Return a sorted copy of `items`, leaving the input untouched.
#[must_use]
pub fn sorted<T: Movable>(items: &[T]) -> Vec<T> {
    let mut result = items.to_vec();
    result.sort_by(compare_movable);
    result
}

/// Sort a collection that may contain absent entries.
///
/// Absent entries come before any present item.
#[must_use]
pub fn sorted_nullable<T: Movable>(items: &[Option<T>]) -> Vec<Option<T>> {
    let mut result = items.to_vec();
    result.sort_by(|a, b| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_movable(a, b),
    });
    result
}

#[cfg(test)]
#[path = "sorting_tests.rs"]
mod sorting_tests;
