//! Age coercion and summary statistics

use serde::Serialize;
use serde_json::Value;

/// An inclusive age range used for bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBucket {
    pub low: i64,
    pub high: i64,
}

impl AgeBucket {
    #[must_use]
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    #[must_use]
    pub fn contains(&self, age: i64) -> bool {
        (self.low..=self.high).contains(&age)
    }

    /// Label in the form `"low-high"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.low, self.high)
    }
}

/// The seven fixed reporting buckets; together they cover 0 to 120
pub const AGE_BUCKETS: [AgeBucket; 7] = [
    AgeBucket::new(0, 12),
    AgeBucket::new(13, 17),
    AgeBucket::new(18, 29),
    AgeBucket::new(30, 44),
    AgeBucket::new(45, 59),
    AgeBucket::new(60, 74),
    AgeBucket::new(75, 120),
];

/// Coerce a raw age cell to an integer age
///
/// Text is trimmed and parsed as a number, then truncated toward zero.
/// Blank, non-numeric and non-finite values yield `None`.
#[must_use]
pub fn coerce_age(cell: &Value) -> Option<i64> {
    let number = match cell {
        Value::Number(n) => n.as_f64()?,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };

    if !number.is_finite() {
        return None;
    }
    let truncated = number.trunc();
    #[allow(clippy::cast_precision_loss)]
    let in_range = truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64;
    #[allow(clippy::cast_possible_truncation)]
    let age = truncated as i64;
    in_range.then_some(age)
}

/// Count of samples falling in one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub label: String,
    pub low: i64,
    pub high: i64,
    pub count: usize,
}

/// Summary statistics over the validated age samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    /// One entry per [`AGE_BUCKETS`] range, in order
    pub buckets: Vec<BucketCount>,
}

impl AgeSummary {
    /// Compute the summary, or `None` when there are no samples
    ///
    /// Ages outside 0..=120 count toward count/min/max/mean/median but fall
    /// into no bucket.
    #[must_use]
    pub fn from_samples(ages: &[i64]) -> Option<Self> {
        if ages.is_empty() {
            return None;
        }

        let mut sorted = ages.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        #[allow(clippy::cast_precision_loss)]
        let mean = sorted.iter().map(|&age| age as f64).sum::<f64>() / count as f64;
        #[allow(clippy::cast_precision_loss)]
        let median = if count % 2 == 1 {
            sorted[count / 2] as f64
        } else {
            (sorted[count / 2 - 1] as f64 + sorted[count / 2] as f64) / 2.0
        };

        let buckets = AGE_BUCKETS
            .iter()
            .map(|bucket| BucketCount {
                label: bucket.label(),
                low: bucket.low,
                high: bucket.high,
                count: sorted.iter().filter(|&&age| bucket.contains(age)).count(),
            })
            .collect();

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median,
            buckets,
        })
    }

    /// Look up a bucket count by its label
    #[must_use]
    pub fn bucket(&self, label: &str) -> Option<usize> {
        self.buckets
            .iter()
            .find(|bucket| bucket.label == label)
            .map(|bucket| bucket.count)
    }

    /// The same summary with mean and median rounded for display
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            mean: round2(self.mean),
            median: round2(self.median),
            ..self.clone()
        }
    }
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
