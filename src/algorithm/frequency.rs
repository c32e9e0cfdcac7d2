//! Frequency and duration counters
//!
//! Both tables remember the order in which keys were first seen, which is
//! the tie-break for equal counts when ranking.

use indexmap::IndexMap;
use indexmap::map::Entry;
use itertools::Itertools;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

/// One row of a ranked table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub count: usize,
}

impl RankedEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Counts per token, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize, FxBuildHasher>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Count `n` more occurrences of `key`
    pub fn add(&mut self, key: &str, n: usize) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += n;
        } else {
            self.counts.insert(key.to_string(), n);
        }
    }

    /// Fold another table into this one; keys new to `self` keep `other`'s order
    pub fn merge(&mut self, other: Self) {
        for (key, n) in other.counts {
            match self.counts.entry(key) {
                Entry::Occupied(mut slot) => *slot.get_mut() += n,
                Entry::Vacant(slot) => {
                    slot.insert(n);
                }
            }
        }
    }

    /// Count recorded for `key`, zero if never seen
    #[must_use]
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(key, count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(key, &count)| (key.as_str(), count))
    }

    /// Entries by count descending, ties in first-seen order
    ///
    /// # Arguments
    /// * `limit` - Keep only the first `limit` entries; `None` keeps all
    #[must_use]
    pub fn ranked(&self, limit: Option<usize>) -> Vec<RankedEntry> {
        self.iter()
            .enumerate()
            .sorted_by(|(seen_a, a), (seen_b, b)| b.1.cmp(&a.1).then(seen_a.cmp(seen_b)))
            .take(limit.unwrap_or(usize::MAX))
            .map(|(_, (label, count))| RankedEntry::new(label, count))
            .collect()
    }

    /// The highest-count entry, if any
    #[must_use]
    pub fn top(&self) -> Option<RankedEntry> {
        self.ranked(Some(1)).into_iter().next()
    }
}

impl<'a> Extend<&'a str> for FrequencyTable {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, keys: I) {
        for key in keys {
            self.increment(key);
        }
    }
}

/// A ranked duration breakdown for one symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedDurations {
    pub symptom: String,
    /// All duration occurrences for this symptom, before any top-K cut
    pub total: usize,
    pub durations: Vec<RankedEntry>,
}

/// Duration counts nested under normalized symptom keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationTable {
    by_symptom: IndexMap<String, FrequencyTable, FxBuildHasher>,
}

impl DurationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `duration` for `symptom`
    pub fn increment(&mut self, symptom: &str, duration: &str) {
        if let Some(table) = self.by_symptom.get_mut(symptom) {
            table.increment(duration);
        } else {
            let mut table = FrequencyTable::new();
            table.increment(duration);
            self.by_symptom.insert(symptom.to_string(), table);
        }
    }

    pub fn merge(&mut self, other: Self) {
        for (symptom, table) in other.by_symptom {
            match self.by_symptom.entry(symptom) {
                Entry::Occupied(mut slot) => slot.get_mut().merge(table),
                Entry::Vacant(slot) => {
                    slot.insert(table);
                }
            }
        }
    }

    /// Durations recorded for `symptom`
    #[must_use]
    pub fn get(&self, symptom: &str) -> Option<&FrequencyTable> {
        self.by_symptom.get(symptom)
    }

    /// Number of distinct symptoms with duration data
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_symptom.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_symptom.is_empty()
    }

    /// Total duration occurrences for `symptom`
    #[must_use]
    pub fn total_for(&self, symptom: &str) -> usize {
        self.get(symptom).map_or(0, FrequencyTable::total)
    }

    /// Total duration occurrences across all symptoms
    #[must_use]
    pub fn total(&self) -> usize {
        self.by_symptom.values().map(FrequencyTable::total).sum()
    }

    /// Iterate `(symptom, durations)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyTable)> {
        self.by_symptom
            .iter()
            .map(|(symptom, table)| (symptom.as_str(), table))
    }

    /// Symptoms by total occurrences descending, durations ranked within each
    ///
    /// # Arguments
    /// * `symptom_limit` - Number of symptoms to keep; `None` keeps all
    /// * `duration_limit` - Top-K durations per symptom; `None` keeps all
    #[must_use]
    pub fn ranked(
        &self,
        symptom_limit: Option<usize>,
        duration_limit: Option<usize>,
    ) -> Vec<RankedDurations> {
        self.iter()
            .enumerate()
            .map(|(seen, (symptom, table))| (seen, symptom, table, table.total()))
            .sorted_by(|a, b| b.3.cmp(&a.3).then(a.0.cmp(&b.0)))
            .take(symptom_limit.unwrap_or(usize::MAX))
            .map(|(_, symptom, table, total)| RankedDurations {
                symptom: symptom.to_string(),
                total,
                durations: table.ranked(duration_limit),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_ties_keep_first_seen_order() {
        let mut table = FrequencyTable::new();
        table.extend(["cough", "fever", "rash", "fever", "cough", "chills"]);

        let ranked = table.ranked(None);
        assert_eq!(
            ranked,
            vec![
                RankedEntry::new("cough", 2),
                RankedEntry::new("fever", 2),
                RankedEntry::new("rash", 1),
                RankedEntry::new("chills", 1),
            ]
        );
        assert_eq!(table.total(), 6);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_ranked_limit() {
        let mut table = FrequencyTable::new();
        table.extend(["a", "b", "b", "c", "c", "c"]);
        let ranked = table.ranked(Some(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], RankedEntry::new("c", 3));
        assert_eq!(table.top(), Some(RankedEntry::new("c", 3)));
        assert_eq!(FrequencyTable::new().top(), None);
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut left = FrequencyTable::new();
        left.extend(["fever", "cough"]);
        let mut right = FrequencyTable::new();
        right.extend(["cough", "rash", "rash"]);

        left.merge(right);
        assert_eq!(left.get("fever"), 1);
        assert_eq!(left.get("cough"), 2);
        assert_eq!(left.get("rash"), 2);
        assert_eq!(left.get("missing"), 0);
    }

    #[test]
    fn test_duration_table_ranks_by_symptom_total() {
        let mut table = DurationTable::new();
        table.increment("fever", "2 days");
        table.increment("cough", "6 months");
        table.increment("cough", "2 days");
        table.increment("cough", "6 months");

        let ranked = table.ranked(None, Some(1));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].symptom, "cough");
        assert_eq!(ranked[0].total, 3);
        assert_eq!(ranked[0].durations, vec![RankedEntry::new("6 months", 2)]);
        assert_eq!(ranked[1].symptom, "fever");
        assert_eq!(table.total_for("cough"), 3);
        assert_eq!(table.total(), 4);
    }
}
