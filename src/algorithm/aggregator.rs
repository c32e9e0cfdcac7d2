//! Single-pass aggregation of intake records
//!
//! [`Aggregator`] owns every counter for the duration of a run. Records are
//! folded in one at a time with [`Aggregator::add_record`]; when the batch is
//! done, [`Aggregator::finish`] hands back an immutable [`Aggregates`]
//! snapshot. Folding is commutative, so partial aggregators over a partition
//! of the input can be combined with [`Aggregator::merge`].

use std::time::Instant;

use rustc_hash::FxHashSet;

use crate::algorithm::age::AgeSummary;
use crate::algorithm::associated::derive_associated;
use crate::algorithm::frequency::{DurationTable, FrequencyTable};
use crate::models::record::IntakeRecord;
use crate::parse::normalize;
use crate::utils::logging::{log_batch_complete, log_record_degraded};

/// Gender category used when a record carries no gender
pub const MISSING_GENDER: &str = "(missing)";

/// Mutable accumulation state for one batch
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    symptoms: FrequencyTable,
    initial_symptoms: FrequencyTable,
    associated_symptoms: FrequencyTable,
    specialists: FrequencyTable,
    genders: FrequencyTable,
    symptom_durations: DurationTable,
    associated_durations: DurationTable,
    ages: Vec<i64>,
    records: usize,
    unparsed_durations: usize,
    rejected_ages: usize,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a whole batch in one pass
    #[must_use]
    pub fn aggregate<'a, I>(records: I) -> Aggregates
    where
        I: IntoIterator<Item = &'a IntakeRecord>,
    {
        let start = Instant::now();
        let aggregator = records
            .into_iter()
            .fold(Self::new(), |mut acc, record| {
                acc.add_record(record);
                acc
            });
        log_batch_complete("aggregated", aggregator.records, Some(start.elapsed()));
        aggregator.finish()
    }

    /// Fold one record into every counter
    pub fn add_record(&mut self, record: &IntakeRecord) {
        let index = self.records;
        self.records += 1;

        let symptoms = normalized_tokens(&record.symptoms);
        self.symptoms.extend(symptoms.iter().map(String::as_str));

        let initial = normalized_tokens(&record.initial_symptom);
        self.initial_symptoms.extend(initial.iter().map(String::as_str));

        let associated = normalized_tokens(&derive_associated(
            &record.symptoms,
            &record.initial_symptom,
        ));
        self.associated_symptoms
            .extend(associated.iter().map(String::as_str));

        self.add_durations(index, record, &associated);

        if let Some(specialist) = record.suggested_specialist.as_deref() {
            let specialist = specialist.trim();
            if !specialist.is_empty() {
                self.specialists.increment(specialist);
            }
        }

        let gender = record
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(MISSING_GENDER);
        self.genders.increment(gender);

        match record.age {
            Some(age) => self.ages.push(age),
            None if record.age_rejected => {
                self.rejected_ages += 1;
                log_record_degraded(index, "age", "value is not numeric");
            }
            None => {}
        }
    }

    fn add_durations(&mut self, index: usize, record: &IntakeRecord, associated: &[String]) {
        if record.symptom_duration.is_unavailable() {
            self.unparsed_durations += 1;
            log_record_degraded(index, "symptom_duration", "not a symptom/duration mapping");
            return;
        }

        let associated: FxHashSet<&str> = associated.iter().map(String::as_str).collect();
        for (symptom, duration) in record.symptom_duration.pairs() {
            let symptom = normalize(symptom);
            let duration = duration.trim();
            if symptom.is_empty() || duration.is_empty() {
                continue;
            }
            self.symptom_durations.increment(&symptom, duration);
            if associated.contains(symptom.as_str()) {
                self.associated_durations.increment(&symptom, duration);
            }
        }
    }

    /// Combine another partial aggregation into this one
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.symptoms.merge(other.symptoms);
        self.initial_symptoms.merge(other.initial_symptoms);
        self.associated_symptoms.merge(other.associated_symptoms);
        self.specialists.merge(other.specialists);
        self.genders.merge(other.genders);
        self.symptom_durations.merge(other.symptom_durations);
        self.associated_durations.merge(other.associated_durations);
        self.ages.extend(other.ages);
        self.records += other.records;
        self.unparsed_durations += other.unparsed_durations;
        self.rejected_ages += other.rejected_ages;
        self
    }

    /// Number of records folded so far
    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    /// Stop accumulating and freeze the counters
    #[must_use]
    pub fn finish(self) -> Aggregates {
        let age_summary = AgeSummary::from_samples(&self.ages);
        Aggregates {
            symptoms: self.symptoms,
            initial_symptoms: self.initial_symptoms,
            associated_symptoms: self.associated_symptoms,
            specialists: self.specialists,
            genders: self.genders,
            symptom_durations: self.symptom_durations,
            associated_durations: self.associated_durations,
            age_summary,
            records: self.records,
            unparsed_durations: self.unparsed_durations,
            rejected_ages: self.rejected_ages,
        }
    }
}

/// Normalize tokens for counting, dropping any that normalize to empty
fn normalized_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| normalize(token))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Read-only result of one aggregation run
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    symptoms: FrequencyTable,
    initial_symptoms: FrequencyTable,
    associated_symptoms: FrequencyTable,
    specialists: FrequencyTable,
    genders: FrequencyTable,
    symptom_durations: DurationTable,
    associated_durations: DurationTable,
    age_summary: Option<AgeSummary>,
    records: usize,
    unparsed_durations: usize,
    rejected_ages: usize,
}

impl Aggregates {
    #[must_use]
    pub fn symptoms(&self) -> &FrequencyTable {
        &self.symptoms
    }

    #[must_use]
    pub fn initial_symptoms(&self) -> &FrequencyTable {
        &self.initial_symptoms
    }

    #[must_use]
    pub fn associated_symptoms(&self) -> &FrequencyTable {
        &self.associated_symptoms
    }

    #[must_use]
    pub fn specialists(&self) -> &FrequencyTable {
        &self.specialists
    }

    /// Raw gender strings, no spelling-variant merging
    #[must_use]
    pub fn genders(&self) -> &FrequencyTable {
        &self.genders
    }

    #[must_use]
    pub fn symptom_durations(&self) -> &DurationTable {
        &self.symptom_durations
    }

    #[must_use]
    pub fn associated_durations(&self) -> &DurationTable {
        &self.associated_durations
    }

    /// Age statistics, `None` if no record had a usable age
    #[must_use]
    pub fn age_summary(&self) -> Option<&AgeSummary> {
        self.age_summary.as_ref()
    }

    /// Number of records in the batch
    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    /// Records whose duration cell was present but not a mapping
    #[must_use]
    pub fn unparsed_durations(&self) -> usize {
        self.unparsed_durations
    }

    /// Records whose age cell was present but not numeric
    #[must_use]
    pub fn rejected_ages(&self) -> usize {
        self.rejected_ages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::DurationField;

    fn durations(pairs: &[(&str, &str)]) -> DurationField {
        DurationField::Available(
            pairs
                .iter()
                .map(|(s, d)| ((*s).to_string(), (*d).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_duplicates_count_by_multiplicity() {
        let record = IntakeRecord::with_symptoms(&["Fever", "fever ", "Cough"], &["Cough"]);
        let aggregates = Aggregator::aggregate([&record]);

        assert_eq!(aggregates.symptoms().get("fever"), 2);
        assert_eq!(aggregates.symptoms().len(), 2);
        assert_eq!(aggregates.associated_symptoms().get("fever"), 2);
        assert_eq!(aggregates.initial_symptoms().get("cough"), 1);
    }

    #[test]
    fn test_duration_tables_gate_on_associated_set() {
        let record = IntakeRecord {
            symptom_duration: durations(&[
                ("Fever", "2 days"),
                ("Cough ", " 1 week "),
                ("rash", ""),
            ]),
            ..IntakeRecord::with_symptoms(&["Fever", "Cough", "Rash"], &["fever"])
        };
        let aggregates = Aggregator::aggregate([&record]);

        let by_symptom = aggregates.symptom_durations();
        assert_eq!(by_symptom.get("fever").unwrap().get("2 days"), 1);
        assert_eq!(by_symptom.get("cough").unwrap().get("1 week"), 1);
        assert!(by_symptom.get("rash").is_none());

        let associated = aggregates.associated_durations();
        assert!(associated.get("fever").is_none());
        assert_eq!(associated.get("cough").unwrap().get("1 week"), 1);
    }

    #[test]
    fn test_specialist_and_gender_rules() {
        let mut with_values = IntakeRecord::with_symptoms(&["Fever"], &["Fever"]);
        with_values.suggested_specialist = Some(" Neurology ".to_string());
        with_values.gender = Some("male".to_string());

        let mut blank = IntakeRecord::default();
        blank.suggested_specialist = Some("   ".to_string());
        blank.gender = Some(" ".to_string());

        let aggregates = Aggregator::aggregate([&with_values, &blank]);
        assert_eq!(aggregates.specialists().get("Neurology"), 1);
        assert_eq!(aggregates.specialists().len(), 1);
        assert_eq!(aggregates.genders().get("male"), 1);
        assert_eq!(aggregates.genders().get(MISSING_GENDER), 1);
    }

    #[test]
    fn test_unparsed_durations_isolated_to_duration_tables() {
        let record = IntakeRecord {
            symptom_duration: DurationField::Unavailable,
            gender: Some("F".to_string()),
            ..IntakeRecord::with_symptoms(&["Fever", "Cough"], &["Fever"])
        };
        let aggregates = Aggregator::aggregate([&record]);

        assert_eq!(aggregates.symptoms().total(), 2);
        assert_eq!(aggregates.associated_symptoms().get("cough"), 1);
        assert_eq!(aggregates.genders().get("F"), 1);
        assert!(aggregates.symptom_durations().is_empty());
        assert!(aggregates.associated_durations().is_empty());
        assert_eq!(aggregates.unparsed_durations(), 1);
    }

    #[test]
    fn test_ages_collected_and_rejections_counted() {
        let aged = IntakeRecord {
            age: Some(40),
            ..IntakeRecord::default()
        };
        let rejected = IntakeRecord {
            age_rejected: true,
            ..IntakeRecord::default()
        };
        let aggregates = Aggregator::aggregate([&aged, &rejected, &IntakeRecord::default()]);

        let summary = aggregates.age_summary().unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(aggregates.rejected_ages(), 1);
        assert_eq!(aggregates.records(), 3);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let first = IntakeRecord::with_symptoms(&["Fever", "Cough"], &["Fever"]);
        let second = IntakeRecord::with_symptoms(&["Cough", "Rash"], &["rash"]);

        let mut left = Aggregator::new();
        left.add_record(&first);
        let mut right = Aggregator::new();
        right.add_record(&second);

        let merged = left.merge(right).finish();
        let single = Aggregator::aggregate([&first, &second]);

        assert_eq!(merged.symptoms(), single.symptoms());
        assert_eq!(merged.associated_symptoms(), single.associated_symptoms());
        assert_eq!(merged.records(), 2);
    }
}
