//! Order-insensitive comparison helpers for set-like collections.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// True when both slices hold the same elements with the same multiplicities.
pub fn multiset_eq<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut matched = vec![false; right.len()];
    'outer: for item in left {
        for (index, candidate) in right.iter().enumerate() {
            if !matched[index] && candidate == item {
                matched[index] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

/// Feeds a hash of the elements into `state` that does not depend on their order.
pub fn hash_unordered<T: Hash, H: Hasher>(items: &[T], state: &mut H) {
    let mut hashes: Vec<u64> = items
        .iter()
        .map(|item| {
            let mut hasher = DefaultHasher::new();
            item.hash(&mut hasher);
            hasher.finish()
        })
        .collect();
    hashes.sort_unstable();
    hashes.hash(state);
}
