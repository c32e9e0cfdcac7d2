//! Associated-symptom derivation
//!
//! An associated symptom is one the patient reported that is not among their
//! chief complaints. Comparison is on normalized tokens, but the output keeps
//! the surface form and order of the symptom list.

use serde_json::Value;

use crate::models::field::TokenList;
use crate::models::record::RawRecord;
use crate::parse::{normalize, normalized_set, parse_list};

/// Output column written by [`derive_associated_field`]
pub const ASSOCIATED_FIELD: &str = "associated_symptom";

/// Derive the associated symptoms for one record
///
/// # Arguments
/// * `symptoms` - All reported symptoms, as parsed
/// * `initial` - The chief complaints, as parsed
///
/// # Returns
/// The symptoms whose normalized form is not a chief complaint. When no chief
/// complaint was recorded the result is empty, even if symptoms exist: such a
/// record contributes nothing to associated-symptom statistics.
#[must_use]
pub fn derive_associated<S: AsRef<str>>(symptoms: &[S], initial: &[S]) -> TokenList {
    if initial.is_empty() {
        return TokenList::new();
    }

    let chief = normalized_set(initial);
    symptoms
        .iter()
        .map(|symptom| symptom.as_ref())
        .filter(|symptom| !chief.contains(&normalize(symptom)))
        .map(str::to_string)
        .collect()
}

/// Copy `raw` with an `associated_symptom` column added
///
/// The column holds the derived list as a JSON array, or null when the
/// derivation is empty. Every other field is carried over untouched.
#[must_use]
pub fn derive_associated_field(raw: &RawRecord) -> RawRecord {
    let symptoms = parse_list(&raw.symptoms);
    let initial = parse_list(&raw.initial_symptom);
    let associated = derive_associated(&symptoms, &initial);

    let value = if associated.is_empty() {
        Value::Null
    } else {
        Value::Array(associated.into_iter().map(Value::String).collect())
    };

    let mut derived = raw.clone();
    derived.extra.insert(ASSOCIATED_FIELD.to_string(), value);
    derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_associated_is_case_insensitive_difference() {
        let associated = derive_associated(&["Fever", "Cough"], &["fever"]);
        assert_eq!(associated.as_slice(), ["Cough"]);
    }

    #[test]
    fn test_empty_initial_propagates_to_empty_associated() {
        let associated = derive_associated(&["Fever", "Cough"], &[]);
        assert!(associated.is_empty());
    }

    #[test]
    fn test_identical_lists_give_empty_associated() {
        let associated = derive_associated(&["Headache", "Nausea"], &["nausea ", "HEADACHE"]);
        assert!(associated.is_empty());
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let associated = derive_associated(
            &["Cough", "fever", "Chills", "cough", "Rash"],
            &["Fever"],
        );
        assert_eq!(associated.as_slice(), ["Cough", "Chills", "cough", "Rash"]);
    }

    #[test]
    fn test_associated_never_intersects_initial() {
        let symptoms = ["Back pain", " back pain", "Leg Pain", "stress"];
        let initial = ["BACK PAIN", "Stress"];
        let associated = derive_associated(&symptoms, &initial);

        let chief = normalized_set(initial);
        assert!(associated.iter().all(|s| !chief.contains(&normalize(s))));
        assert_eq!(associated.as_slice(), ["Leg Pain"]);
    }

    #[test]
    fn test_derive_associated_field_adds_column() {
        let raw: RawRecord = serde_json::from_value(json!({
            "symptoms": "[\"Fever\", \"Cough\", \"Rash\"]",
            "initial_symptom": "fever",
            "gender": "M"
        }))
        .unwrap();

        let derived = derive_associated_field(&raw);
        assert_eq!(derived.extra.get(ASSOCIATED_FIELD), Some(&json!(["Cough", "Rash"])));
        assert_eq!(derived.gender, json!("M"));
        assert!(raw.extra.get(ASSOCIATED_FIELD).is_none());
    }

    #[test]
    fn test_derive_associated_field_null_when_empty() {
        let raw: RawRecord = serde_json::from_value(json!({
            "symptoms": "Fever, Cough"
        }))
        .unwrap();
        let derived = derive_associated_field(&raw);
        assert_eq!(derived.extra.get(ASSOCIATED_FIELD), Some(&Value::Null));
    }
}
