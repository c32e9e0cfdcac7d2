//! Typed cell values
//!
//! Upstream producers encode the same logical field in several ways: a JSON
//! list, a JSON object, comma-delimited text or a bare scalar. The field
//! parser collapses all of them into [`FieldValue`], and everything
//! downstream matches on the variant instead of inspecting JSON types.

use smallvec::SmallVec;

/// A short ordered list of tokens parsed from one cell.
///
/// Most intake records carry only a handful of symptoms, so these stay inline.
pub type TokenList = SmallVec<[String; 4]>;

/// A parsed raw cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    /// Null, missing or blank
    #[default]
    Absent,
    /// A single piece of text (trimmed)
    Scalar(String),
    /// A decoded list, elements trimmed with empties dropped
    List(Vec<String>),
    /// A decoded mapping, keys in document order
    Mapping(Vec<(String, String)>),
}

impl FieldValue {
    /// Whether the cell carried nothing
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Interpret the value as an ordered token list
    ///
    /// Scalars containing a comma are split on commas; mappings contribute
    /// their keys.
    #[must_use]
    pub fn into_tokens(self) -> TokenList {
        match self {
            Self::Absent => TokenList::new(),
            Self::List(items) => items.into_iter().collect(),
            Self::Mapping(pairs) => pairs
                .into_iter()
                .map(|(key, _)| key.trim().to_string())
                .filter(|key| !key.is_empty())
                .collect(),
            Self::Scalar(text) => split_delimited(&text),
        }
    }

    /// Interpret the value as a symptom→duration mapping
    #[must_use]
    pub fn into_durations(self) -> DurationField {
        match self {
            Self::Absent => DurationField::Missing,
            Self::Mapping(pairs) => DurationField::Available(pairs),
            Self::Scalar(_) | Self::List(_) => DurationField::Unavailable,
        }
    }
}

/// Split delimited text into trimmed, non-empty tokens
fn split_delimited(text: &str) -> TokenList {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TokenList::new();
    }
    if trimmed.contains(',') {
        let parts: TokenList = trimmed
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        if !parts.is_empty() {
            return parts;
        }
    }
    let mut single = TokenList::new();
    single.push(trimmed.to_string());
    single
}

/// The per-record duration data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DurationField {
    /// No duration cell was supplied
    #[default]
    Missing,
    /// A cell was supplied but did not decode into a mapping
    Unavailable,
    /// Symptom→duration pairs, raw (not yet normalized)
    Available(Vec<(String, String)>),
}

impl DurationField {
    /// The pairs to aggregate, empty unless the mapping decoded
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        match self {
            Self::Available(pairs) => pairs,
            Self::Missing | Self::Unavailable => &[],
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}
