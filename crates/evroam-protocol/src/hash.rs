//! Hash precomputation helpers for immutable messages.
//!
//! Messages cache one `u64` at construction time, combined from their
//! domain fields with a ×31 accumulator. A set-typed field contributes the
//! wrapping sum of its elements' hashes, so enumeration order cannot change
//! the cached value: two messages the equality contract treats as equal
//! always cache the same hash.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Hashes a single value with the standard hasher.
pub(crate) fn of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Hashes an ordered sequence: element order changes the result.
pub(crate) fn of_iter_ordered<'a, T, I>(iter: I) -> u64
where
    T: Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    iter.into_iter().fold(7, |acc, item| combine(acc, of(item)))
}

/// Hashes an unordered collection: the wrapping sum of element hashes,
/// independent of enumeration order.
pub(crate) fn of_iter_unordered<'a, T, I>(iter: I) -> u64
where
    T: Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    iter.into_iter()
        .fold(0u64, |acc, item| acc.wrapping_add(of(item)))
}

/// Folds one field's hash into the running accumulator.
pub(crate) fn combine(acc: u64, field: u64) -> u64 {
    acc.wrapping_mul(31).wrapping_add(field)
}
