//! String metrics for ranking near-matches.
//!
//! Each metric scores two byte sequences assumed to share an encoding.
//! `JaroWinkler` is a similarity (1.0 = identical), `Levenshtein` a
//! normalized distance (0.0 = identical). `MetricRegistry` hides that
//! difference behind a single ascending rank.

mod jaro_winkler;
mod levenshtein;
mod registry;

use std::fmt;
use std::str::FromStr;

pub use jaro_winkler::JaroWinkler;
pub use levenshtein::Levenshtein;
pub use registry::MetricRegistry;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("metric {0} is disabled")]
    Disabled(MetricKind),
}

/// Whether a higher score means a better match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Similarity,
    Distance,
}

pub trait Metric: Send + Sync {
    fn calculate(&self, x: &[u8], y: &[u8]) -> f64;

    fn polarity(&self) -> Polarity;

    /// Whether `score` passes `threshold`, read in this metric's polarity.
    fn accepts(&self, score: f64, threshold: f64) -> bool {
        match self.polarity() {
            Polarity::Similarity => score >= threshold,
            Polarity::Distance => score <= threshold,
        }
    }

    /// Maps `score` onto the ascending rank scale: similarities are
    /// negated, distances pass through.
    fn rank_of(&self, score: f64) -> f64 {
        match self.polarity() {
            Polarity::Similarity => -score,
            Polarity::Distance => score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    JaroWinkler,
    Levenshtein,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::JaroWinkler, MetricKind::Levenshtein];

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::JaroWinkler => "jaro_winkler",
            MetricKind::Levenshtein => "levenshtein",
        }
    }

    pub fn metric(self) -> &'static dyn Metric {
        match self {
            MetricKind::JaroWinkler => &JaroWinkler,
            MetricKind::Levenshtein => &Levenshtein,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.is_empty() {
            return Err(MetricError::InvalidArgument(
                "metric name is empty".to_string(),
            ));
        }
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| MetricError::UnknownMetric(name.to_string()))
    }
}
