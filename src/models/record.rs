//! Intake record models
//!
//! [`RawRecord`] is what the field-extraction stage hands over: the six
//! logical fields plus lifestyle text, each as an untyped JSON value.
//! [`IntakeRecord`] is the parsed form the aggregator folds over.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::algorithm::age::coerce_age;
use crate::models::field::{DurationField, TokenList};
use crate::parse::{parse_durations, parse_list, scalar_text};

/// One patient intake as delivered by the extraction stage
///
/// Missing fields deserialize as `Value::Null`. Fields this crate does not
/// interpret (for example `raw_json`) are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub lifestyle_factors: Value,
    #[serde(default)]
    pub age: Value,
    #[serde(default)]
    pub gender: Value,
    #[serde(default)]
    pub symptoms: Value,
    #[serde(default)]
    pub symptom_duration: Value,
    #[serde(default)]
    pub initial_symptom: Value,
    #[serde(default)]
    pub suggested_specialist: Value,
    /// Any other fields carried on the record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecord {
    /// Parse every cell into its typed form
    #[must_use]
    pub fn parse(&self) -> IntakeRecord {
        IntakeRecord::from(self)
    }
}

/// A parsed intake record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeRecord {
    /// Free-text lifestyle notes (not aggregated)
    pub lifestyle_factors: Option<String>,
    /// Validated age, if the raw value coerced to a number
    pub age: Option<i64>,
    /// Whether an age cell was supplied but could not be coerced
    pub age_rejected: bool,
    /// Trimmed raw gender
    pub gender: Option<String>,
    /// All reported symptoms, original surface form
    pub symptoms: TokenList,
    /// Symptom→duration data
    pub symptom_duration: DurationField,
    /// Chief complaints, original surface form
    pub initial_symptom: TokenList,
    /// Trimmed raw specialist suggestion
    pub suggested_specialist: Option<String>,
}

impl From<&RawRecord> for IntakeRecord {
    fn from(raw: &RawRecord) -> Self {
        let age = coerce_age(&raw.age);
        Self {
            lifestyle_factors: scalar_text(&raw.lifestyle_factors),
            age,
            age_rejected: age.is_none() && scalar_text(&raw.age).is_some(),
            gender: scalar_text(&raw.gender),
            symptoms: parse_list(&raw.symptoms),
            symptom_duration: parse_durations(&raw.symptom_duration),
            initial_symptom: parse_list(&raw.initial_symptom),
            suggested_specialist: scalar_text(&raw.suggested_specialist),
        }
    }
}

impl IntakeRecord {
    /// Start building a record from symptom and chief-complaint lists
    #[must_use]
    pub fn with_symptoms<S: AsRef<str>>(symptoms: &[S], initial: &[S]) -> Self {
        Self {
            symptoms: symptoms.iter().map(|s| s.as_ref().to_string()).collect(),
            initial_symptom: initial.iter().map(|s| s.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }
}
