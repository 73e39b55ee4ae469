//! Keyed sort used by every ranking mode

use std::cmp::Reverse;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Non-decreasing keys
    Ascending,
    /// Non-increasing keys
    Descending,
}

/// Sort `items` by a key derived from each item.
///
/// The key is computed once per item. Items with equal keys keep their
/// relative order in both directions.
pub fn sort_by_derived_key<T, K, F>(items: &mut [T], mut key: F, direction: SortDirection)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    match direction {
        SortDirection::Ascending => items.sort_by_cached_key(key),
        SortDirection::Descending => items.sort_by_cached_key(|item| Reverse(key(item))),
    }
}
