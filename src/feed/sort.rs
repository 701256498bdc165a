use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};

use super::classify::classify;
use super::status::resolve_status;
use super::types::Item;

/// Composite sort key: status demotion, classification priority, then
/// recency (newest first). An item without a usable timestamp orders
/// as oldest within its group.
pub fn sort_key(item: &Item, done: &HashSet<String>, snoozed: &HashMap<String, i64>) -> (u8, u8, Reverse<i64>) {
    let status = resolve_status(&item.id, done, snoozed);
    let ts = item.timestamp.unwrap_or(i64::MIN);
    (status.rank(), classify(item).rank(), Reverse(ts))
}

/// Total order over items per the composite key. Ties compare equal;
/// the stable sort below preserves input order for them.
pub fn compare(
    a: &Item,
    b: &Item,
    done: &HashSet<String>,
    snoozed: &HashMap<String, i64>,
) -> Ordering {
    sort_key(a, done, snoozed).cmp(&sort_key(b, done, snoozed))
}

/// Sort filtered indices into display order. `sort_by_key` is stable,
/// so indices with identical keys keep their original relative order.
pub fn sort_indices(
    items: &[Item],
    mut indices: Vec<usize>,
    done: &HashSet<String>,
    snoozed: &HashMap<String, i64>,
) -> Vec<usize> {
    indices.sort_by_key(|&i| sort_key(&items[i], done, snoozed));
    indices
}
