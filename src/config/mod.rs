//! Configuration for report building.

use std::fmt;

use crate::error::{Result, TriageStatsError};

/// Environment variable overriding [`ReportConfig::symptom_limit`]
pub const ENV_SYMPTOM_LIMIT: &str = "TRIAGE_SYMPTOM_LIMIT";
/// Environment variable overriding [`ReportConfig::duration_symptom_limit`]
pub const ENV_DURATION_SYMPTOM_LIMIT: &str = "TRIAGE_DURATION_SYMPTOM_LIMIT";
/// Environment variable overriding [`ReportConfig::durations_per_symptom`]
pub const ENV_DURATIONS_PER_SYMPTOM: &str = "TRIAGE_DURATIONS_PER_SYMPTOM";
/// Environment variable overriding [`ReportConfig::specialist_limit`]
pub const ENV_SPECIALIST_LIMIT: &str = "TRIAGE_SPECIALIST_LIMIT";

/// Configuration for the report builder
///
/// A limit of `None` means the ranking is not truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Top-N for the symptom, initial-symptom and associated-symptom rankings
    pub symptom_limit: Option<usize>,
    /// Number of symptoms shown in each duration table
    pub duration_symptom_limit: Option<usize>,
    /// Number of durations shown per symptom
    pub durations_per_symptom: Option<usize>,
    /// Top-N for the specialist ranking
    pub specialist_limit: Option<usize>,
    /// Whether to produce the merged gender ranking alongside the raw one
    pub merge_gender_variants: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            symptom_limit: Some(50),
            duration_symptom_limit: Some(30),
            durations_per_symptom: Some(5),
            specialist_limit: None,
            merge_gender_variants: true,
        }
    }
}

impl ReportConfig {
    /// Build a configuration from defaults overridden by environment variables
    ///
    /// # Errors
    /// Returns a `Config` error if a variable is set but is not a number or `all`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let overrides: [(&str, &mut Option<usize>); 4] = [
            (ENV_SYMPTOM_LIMIT, &mut config.symptom_limit),
            (ENV_DURATION_SYMPTOM_LIMIT, &mut config.duration_symptom_limit),
            (ENV_DURATIONS_PER_SYMPTOM, &mut config.durations_per_symptom),
            (ENV_SPECIALIST_LIMIT, &mut config.specialist_limit),
        ];

        for (key, slot) in overrides {
            if let Some(raw) = lookup(key) {
                *slot = parse_limit(&raw).map_err(|msg| {
                    TriageStatsError::Config(format!("{key}={raw:?}: {msg}"))
                })?;
            }
        }

        Ok(config)
    }

    /// Set the same limit on every symptom ranking
    #[must_use]
    pub fn with_symptom_limit(mut self, limit: Option<usize>) -> Self {
        self.symptom_limit = limit;
        self
    }

    /// Set the number of durations shown per symptom
    #[must_use]
    pub fn with_durations_per_symptom(mut self, limit: Option<usize>) -> Self {
        self.durations_per_symptom = limit;
        self
    }
}

/// Parse a ranking limit; `0` and `all` both mean unlimited
pub fn parse_limit(raw: &str) -> std::result::Result<Option<usize>, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match trimmed.parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(n) => Ok(Some(n)),
        Err(e) => Err(format!("expected a non-negative integer or 'all' ({e})")),
    }
}

fn fmt_limit(limit: Option<usize>) -> String {
    limit.map_or_else(|| "all".to_string(), |n| n.to_string())
}

impl fmt::Display for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report Configuration:")?;
        writeln!(f, "  Symptom Limit: {}", fmt_limit(self.symptom_limit))?;
        writeln!(
            f,
            "  Duration Symptom Limit: {}",
            fmt_limit(self.duration_symptom_limit)
        )?;
        writeln!(
            f,
            "  Durations Per Symptom: {}",
            fmt_limit(self.durations_per_symptom)
        )?;
        writeln!(f, "  Specialist Limit: {}", fmt_limit(self.specialist_limit))?;
        writeln!(f, "  Merge Gender Variants: {}", self.merge_gender_variants)?;
        Ok(())
    }
}
