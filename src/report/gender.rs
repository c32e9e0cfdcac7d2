//! Report-time gender canonicalization
//!
//! Aggregation counts gender strings exactly as recorded. Spelling variants
//! are only merged here, when a report is shown.

use crate::algorithm::frequency::FrequencyTable;

/// Map a recorded gender label to its display category
///
/// `male`/`m` become `M` and `female`/`f` become `F`, case-insensitively.
/// Every other label, including the missing-gender category, is unchanged.
#[must_use]
pub fn canonicalize_gender(label: &str) -> String {
    let trimmed = label.trim();
    match trimmed.to_lowercase().as_str() {
        "male" | "m" => "M".to_string(),
        "female" | "f" => "F".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Merge a raw gender table into display categories
///
/// Categories appear in the order their first variant was seen.
#[must_use]
pub fn merge_gender_variants(raw: &FrequencyTable) -> FrequencyTable {
    let mut merged = FrequencyTable::new();
    for (label, count) in raw.iter() {
        merged.add(&canonicalize_gender(label), count);
    }
    merged
}
