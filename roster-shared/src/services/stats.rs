/// Aggregation helpers for the services

use std::collections::BTreeMap;

/// Groups `items` by `key` and counts each group
///
/// The `BTreeMap` iterates keys in ascending order, so the result is
/// deterministic regardless of input order.
pub fn count_by<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.into_iter().fold(BTreeMap::new(), |mut counts, item| {
        *counts.entry(key(&item)).or_insert(0) += 1;
        counts
    })
}
