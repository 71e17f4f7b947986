use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lenient::skip_invalid_entries;
use crate::domain::value_objects::{DateKey, UserId};

/// The usage document: per-day, per-user draw counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageLedger(#[serde(deserialize_with = "skip_invalid_entries")] BTreeMap<DateKey, DayCounts>);

/// User id -> count for one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct DayCounts(#[serde(deserialize_with = "skip_invalid_entries")] BTreeMap<String, u64>);

impl UsageLedger {
    pub fn uses(&self, day: DateKey, user: UserId) -> u64 {
        self.0
            .get(&day)
            .and_then(|users| users.0.get(&user.as_key()))
            .copied()
            .unwrap_or(0)
    }

    /// Bump the user's count for the day and return the new value
    pub fn increment(&mut self, day: DateKey, user: UserId) -> u64 {
        let count = self
            .0
            .entry(day)
            .or_default()
            .0
            .entry(user.as_key())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Keep only the `keep` most recent days; returns the dropped days
    pub fn prune(&mut self, keep: usize) -> Vec<DateKey> {
        if self.0.len() <= keep {
            return Vec::new();
        }

        let excess = self.0.len() - keep;
        let dropped: Vec<DateKey> = self.0.keys().take(excess).copied().collect();
        for day in &dropped {
            self.0.remove(day);
        }
        dropped
    }

    pub fn days(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.0.keys().copied()
    }

    pub fn day_count(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn day(s: &str) -> DateKey {
        DateKey::from_str(s).unwrap()
    }

    #[test]
    fn test_increment_counts_per_user_and_day() {
        let mut ledger = UsageLedger::default();
        let alice = UserId::new(1);
        let bob = UserId::new(2);

        assert_eq!(ledger.increment(day("2024-01-01"), alice), 1);
        assert_eq!(ledger.increment(day("2024-01-01"), alice), 2);
        assert_eq!(ledger.increment(day("2024-01-01"), bob), 1);
        assert_eq!(ledger.increment(day("2024-01-02"), alice), 1);

        assert_eq!(ledger.uses(day("2024-01-01"), alice), 2);
        assert_eq!(ledger.uses(day("2024-01-03"), alice), 0);
    }

    #[test]
    fn test_prune_drops_oldest_days() {
        let mut ledger = UsageLedger::default();
        let mut current = day("2024-01-25");
        for _ in 0..9 {
            ledger.increment(current, UserId::new(7));
            current = current.succ();
        }

        let dropped = ledger.prune(7);

        assert_eq!(dropped, vec![day("2024-01-25"), day("2024-01-26")]);
        assert_eq!(ledger.day_count(), 7);
        assert_eq!(ledger.days().next(), Some(day("2024-01-27")));
    }

    #[test]
    fn test_prune_noop_under_limit() {
        let mut ledger = UsageLedger::default();
        ledger.increment(day("2024-01-01"), UserId::new(1));
        assert!(ledger.prune(7).is_empty());
        assert_eq!(ledger.day_count(), 1);
    }

    #[test]
    fn test_invalid_entries_are_dropped_on_load() {
        let ledger: UsageLedger = serde_json::from_value(serde_json::json!({
            "2024-01-01": {"42": 3, "7": "lots", "8": -1},
            "notes": {},
            "2024-01-02": "not a map"
        }))
        .unwrap();

        assert_eq!(ledger.uses(day("2024-01-01"), UserId::new(42)), 3);
        assert_eq!(ledger.uses(day("2024-01-01"), UserId::new(7)), 0);
        assert_eq!(ledger.days().collect::<Vec<_>>(), vec![day("2024-01-01")]);
    }

    #[test]
    fn test_document_shape() {
        let mut ledger = UsageLedger::default();
        ledger.increment(day("2024-05-01"), UserId::new(99));

        assert_eq!(
            serde_json::to_value(&ledger).unwrap(),
            serde_json::json!({"2024-05-01": {"99": 1}})
        );
    }
}
