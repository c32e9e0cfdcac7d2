//! Report building
//!
//! Turns the counters of an [`Aggregates`] snapshot into ranked, serializable
//! tables for the dashboard layer.

use serde::Serialize;

use crate::algorithm::age::AgeSummary;
use crate::algorithm::aggregator::Aggregates;
use crate::algorithm::frequency::{DurationTable, FrequencyTable, RankedDurations, RankedEntry};
use crate::config::ReportConfig;
use crate::report::gender::merge_gender_variants;
use crate::report::summary::Highlights;

/// A ranked frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyReport {
    /// Distinct labels in the full table
    pub unique: usize,
    /// Sum of all counts in the full table
    pub total: usize,
    /// Ranked entries, possibly truncated
    pub entries: Vec<RankedEntry>,
}

impl FrequencyReport {
    #[must_use]
    pub fn from_table(table: &FrequencyTable, limit: Option<usize>) -> Self {
        Self {
            unique: table.len(),
            total: table.total(),
            entries: table.ranked(limit),
        }
    }

    /// Count shown for `label`, if it made the ranking
    #[must_use]
    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }
}

/// A ranked duration table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationReport {
    /// Distinct symptoms with duration data
    pub symptoms: usize,
    pub entries: Vec<RankedDurations>,
}

impl DurationReport {
    #[must_use]
    pub fn from_table(
        table: &DurationTable,
        symptom_limit: Option<usize>,
        duration_limit: Option<usize>,
    ) -> Self {
        Self {
            symptoms: table.len(),
            entries: table.ranked(symptom_limit, duration_limit),
        }
    }

    /// Ranked breakdown for one normalized symptom, if it made the ranking
    #[must_use]
    pub fn symptom(&self, symptom: &str) -> Option<&RankedDurations> {
        self.entries.iter().find(|entry| entry.symptom == symptom)
    }
}

/// Counts of fields that degraded during aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    /// Records whose duration cell could not be read as a mapping
    pub unparsed_durations: usize,
    /// Records whose age cell was present but not numeric
    pub rejected_ages: usize,
}

/// Snapshot of all statistics for one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageReport {
    pub records: usize,
    pub symptoms: FrequencyReport,
    pub initial_symptoms: FrequencyReport,
    pub associated_symptoms: FrequencyReport,
    pub specialists: FrequencyReport,
    /// Gender exactly as recorded
    pub genders: FrequencyReport,
    /// Gender with spelling variants merged, when enabled
    pub genders_merged: Option<FrequencyReport>,
    pub symptom_durations: DurationReport,
    pub associated_durations: DurationReport,
    /// Age statistics with mean and median rounded to two decimals
    pub ages: Option<AgeSummary>,
    pub data_quality: DataQuality,
    pub highlights: Highlights,
}

/// Builds [`TriageReport`]s according to a [`ReportConfig`]
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Rank every table and snapshot the result
    #[must_use]
    pub fn build(&self, aggregates: &Aggregates) -> TriageReport {
        let config = &self.config;
        let genders_merged = config.merge_gender_variants.then(|| {
            FrequencyReport::from_table(&merge_gender_variants(aggregates.genders()), None)
        });

        TriageReport {
            records: aggregates.records(),
            symptoms: FrequencyReport::from_table(aggregates.symptoms(), config.symptom_limit),
            initial_symptoms: FrequencyReport::from_table(
                aggregates.initial_symptoms(),
                config.symptom_limit,
            ),
            associated_symptoms: FrequencyReport::from_table(
                aggregates.associated_symptoms(),
                config.symptom_limit,
            ),
            specialists: FrequencyReport::from_table(
                aggregates.specialists(),
                config.specialist_limit,
            ),
            genders: FrequencyReport::from_table(aggregates.genders(), None),
            genders_merged,
            symptom_durations: DurationReport::from_table(
                aggregates.symptom_durations(),
                config.duration_symptom_limit,
                config.durations_per_symptom,
            ),
            associated_durations: DurationReport::from_table(
                aggregates.associated_durations(),
                config.duration_symptom_limit,
                config.durations_per_symptom,
            ),
            ages: aggregates.age_summary().map(AgeSummary::rounded),
            data_quality: DataQuality {
                unparsed_durations: aggregates.unparsed_durations(),
                rejected_ages: aggregates.rejected_ages(),
            },
            highlights: Highlights::from_aggregates(aggregates),
        }
    }
}

/// Build a report with the default configuration
#[must_use]
pub fn build_report(aggregates: &Aggregates) -> TriageReport {
    ReportBuilder::default().build(aggregates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::aggregator::Aggregator;
    use crate::models::record::IntakeRecord;

    fn records() -> Vec<IntakeRecord> {
        let mut first = IntakeRecord::with_symptoms(&["Fever", "Cough"], &["Fever"]);
        first.gender = Some("male".to_string());
        first.age = Some(20);
        let mut second = IntakeRecord::with_symptoms(&["cough", "Rash"], &["Rash"]);
        second.gender = Some("M".to_string());
        second.age = Some(31);
        vec![first, second]
    }

    #[test]
    fn test_build_ranks_and_limits() {
        let aggregates = Aggregator::aggregate(&records());
        let config = ReportConfig::default().with_symptom_limit(Some(1));
        let report = ReportBuilder::new(config).build(&aggregates);

        assert_eq!(report.records, 2);
        assert_eq!(report.symptoms.entries, vec![RankedEntry::new("cough", 2)]);
        assert_eq!(report.symptoms.unique, 3);
        assert_eq!(report.symptoms.total, 4);
        assert_eq!(report.associated_symptoms.count_of("cough"), Some(2));
    }

    #[test]
    fn test_gender_raw_and_merged() {
        let aggregates = Aggregator::aggregate(&records());
        let report = build_report(&aggregates);

        assert_eq!(report.genders.count_of("male"), Some(1));
        assert_eq!(report.genders.count_of("M"), Some(1));
        let merged = report.genders_merged.unwrap();
        assert_eq!(merged.entries, vec![RankedEntry::new("M", 2)]);
    }

    #[test]
    fn test_merge_can_be_disabled() {
        let aggregates = Aggregator::aggregate(&records());
        let config = ReportConfig {
            merge_gender_variants: false,
            ..ReportConfig::default()
        };
        let report = ReportBuilder::new(config).build(&aggregates);
        assert!(report.genders_merged.is_none());
    }

    #[test]
    fn test_ages_are_rounded() {
        let aggregates = Aggregator::aggregate(&records());
        let ages = build_report(&aggregates).ages.unwrap();
        assert_eq!(ages.mean, 25.5);
        assert_eq!(ages.median, 25.5);
        assert_eq!(ages.count, 2);
    }
}
