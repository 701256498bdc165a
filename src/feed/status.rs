use std::collections::{HashMap, HashSet};

use super::types::LifecycleStatus;

/// Derive an item's lifecycle status from the two membership sets.
///
/// `done` wins over `snoozed` wins over `open`, checked in that fixed
/// order. The memberships are not assumed mutually exclusive.
pub fn resolve_status(
    id: &str,
    done: &HashSet<String>,
    snoozed: &HashMap<String, i64>,
) -> LifecycleStatus {
    if done.contains(id) {
        LifecycleStatus::Done
    } else if snoozed.contains_key(id) {
        LifecycleStatus::Snoozed
    } else {
        LifecycleStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_when_in_neither_set() {
        let done = HashSet::new();
        let snoozed = HashMap::new();
        assert_eq!(resolve_status("a", &done, &snoozed), LifecycleStatus::Open);
    }

    #[test]
    fn snoozed_when_only_snoozed() {
        let done = HashSet::new();
        let snoozed = HashMap::from([("a".to_string(), 1_754_000_000)]);
        assert_eq!(resolve_status("a", &done, &snoozed), LifecycleStatus::Snoozed);
    }

    #[test]
    fn done_wins_over_snoozed() {
        let done = HashSet::from(["a".to_string()]);
        let snoozed = HashMap::from([("a".to_string(), 1_754_000_000)]);
        assert_eq!(resolve_status("a", &done, &snoozed), LifecycleStatus::Done);
    }
}
