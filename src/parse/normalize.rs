//! Token normalization for aggregation keys

use rustc_hash::FxHashSet;

/// Canonicalize a token: trim surrounding whitespace and lower-case it.
///
/// The result is only ever used as a counter key; the original casing is not
/// retained for aggregation.
#[must_use]
pub fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Normalize every token into a set, skipping tokens that normalize to empty
#[must_use]
pub fn normalized_set<I, S>(tokens: I) -> FxHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| normalize(token.as_ref()))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("Fever "), "fever");
        assert_eq!(normalize("fever"), "fever");
        assert_eq!(normalize("  Shortness of Breath\t"), "shortness of breath");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(" Head PAIN ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalized_set_collapses_case_variants() {
        let set = normalized_set(["Cough", "cough ", "  ", "Fever"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("cough"));
        assert!(set.contains("fever"));
    }
}
