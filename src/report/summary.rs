//! Headline indicators and plain-text rendering of a report

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::aggregator::{Aggregates, MISSING_GENDER};
use crate::algorithm::frequency::{RankedDurations, RankedEntry};
use crate::report::builder::{DurationReport, FrequencyReport, TriageReport};

/// Dashboard headline numbers for one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlights {
    pub total_records: usize,
    pub unique_symptoms: usize,
    pub unique_initial_symptoms: usize,
    pub top_symptom: Option<RankedEntry>,
    pub top_initial_symptom: Option<RankedEntry>,
    pub top_specialist: Option<RankedEntry>,
    pub missing_gender: usize,
    /// Share of records without a gender, in percent
    pub missing_gender_pct: f64,
}

impl Highlights {
    #[must_use]
    pub fn from_aggregates(aggregates: &Aggregates) -> Self {
        let total_records = aggregates.records();
        let missing_gender = aggregates.genders().get(MISSING_GENDER);
        #[allow(clippy::cast_precision_loss)]
        let missing_gender_pct = if total_records > 0 {
            (missing_gender as f64 / total_records as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total_records,
            unique_symptoms: aggregates.symptoms().len(),
            unique_initial_symptoms: aggregates.initial_symptoms().len(),
            top_symptom: aggregates.symptoms().top(),
            top_initial_symptom: aggregates.initial_symptoms().top(),
            top_specialist: aggregates.specialists().top(),
            missing_gender,
            missing_gender_pct,
        }
    }
}

fn write_entries(f: &mut fmt::Formatter<'_>, report: &FrequencyReport, empty: &str) -> fmt::Result {
    if report.entries.is_empty() {
        return writeln!(f, "  ({empty})");
    }
    for entry in &report.entries {
        writeln!(f, "  {}: {}", entry.label, entry.count)?;
    }
    Ok(())
}

fn write_durations(f: &mut fmt::Formatter<'_>, report: &DurationReport, empty: &str) -> fmt::Result {
    if report.entries.is_empty() {
        return writeln!(f, "  ({empty})");
    }
    for RankedDurations {
        symptom,
        total,
        durations,
    } in &report.entries
    {
        let top = durations
            .iter()
            .map(|d| format!("{}({})", d.label, d.count))
            .join(", ");
        writeln!(f, "  {symptom}: total={total} | {top}")?;
    }
    Ok(())
}

impl fmt::Display for TriageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Triage Statistics ({} records)", self.records)?;

        writeln!(f, "\nSymptoms frequency:")?;
        write_entries(f, &self.symptoms, "No symptoms found.")?;
        writeln!(f, "  Total unique symptoms: {}", self.symptoms.unique)?;

        writeln!(f, "\nSymptoms and durations:")?;
        write_durations(
            f,
            &self.symptom_durations,
            "No per-symptom duration mappings found.",
        )?;

        writeln!(f, "\nSpecialists frequency:")?;
        write_entries(f, &self.specialists, "No suggested_specialist values found.")?;

        writeln!(f, "\nAge statistics:")?;
        match &self.ages {
            Some(ages) => {
                writeln!(f, "  Count: {}", ages.count)?;
                writeln!(f, "  Min: {}", ages.min)?;
                writeln!(f, "  Max: {}", ages.max)?;
                writeln!(f, "  Mean: {:.2}", ages.mean)?;
                writeln!(f, "  Median: {:.2}", ages.median)?;
                writeln!(f, "  Buckets:")?;
                for bucket in &ages.buckets {
                    writeln!(f, "    {}: {}", bucket.label, bucket.count)?;
                }
            }
            None => writeln!(f, "  (No ages found.)")?,
        }

        writeln!(f, "\nGender frequency:")?;
        write_entries(f, &self.genders, "No records.")?;
        if let Some(merged) = &self.genders_merged {
            writeln!(f, "  Merged:")?;
            for entry in &merged.entries {
                writeln!(f, "    {}: {}", entry.label, entry.count)?;
            }
        }

        writeln!(f, "\nInitial symptoms frequency:")?;
        write_entries(f, &self.initial_symptoms, "No initial symptoms found.")?;
        writeln!(
            f,
            "  Total unique initial symptoms: {}",
            self.initial_symptoms.unique
        )?;

        writeln!(f, "\nAssociated symptoms frequency:")?;
        write_entries(f, &self.associated_symptoms, "No associated symptoms found.")?;
        writeln!(
            f,
            "  Total unique associated symptoms: {}",
            self.associated_symptoms.unique
        )?;

        writeln!(f, "\nAssociated symptoms and durations:")?;
        write_durations(
            f,
            &self.associated_durations,
            "No associated symptom duration pairs found.",
        )?;

        writeln!(
            f,
            "\nMissing gender: {} ({:.1}%)",
            self.highlights.missing_gender, self.highlights.missing_gender_pct
        )?;
        if self.data_quality.unparsed_durations > 0 || self.data_quality.rejected_ages > 0 {
            writeln!(
                f,
                "Skipped fields: {} duration cells, {} ages",
                self.data_quality.unparsed_durations, self.data_quality.rejected_ages
            )?;
        }
        Ok(())
    }
}
