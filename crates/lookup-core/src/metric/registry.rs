use crate::settings::MetricsSettings;

use super::{MetricError, MetricKind};

/// The set of metrics callers may rank with, selected by name.
///
/// `rank` returns values where ascending order puts the best match first,
/// whichever polarity the underlying metric has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRegistry {
    enabled: Vec<MetricKind>,
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::from_settings(&crate::settings::settings().metrics)
    }
}

impl MetricRegistry {
    pub fn new(enabled: impl IntoIterator<Item = MetricKind>) -> Self {
        let mut kinds = Vec::new();
        for kind in enabled {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Self { enabled: kinds }
    }

    pub fn from_settings(metrics: &MetricsSettings) -> Self {
        Self::new(
            MetricKind::ALL
                .into_iter()
                .filter(|kind| metrics.get(*kind).enabled),
        )
    }

    pub fn enabled(&self) -> impl Iterator<Item = MetricKind> + '_ {
        self.enabled.iter().copied()
    }

    /// Looks up an enabled metric by its snake-case name.
    pub fn resolve(&self, name: &str) -> Result<MetricKind, MetricError> {
        let kind: MetricKind = name.parse()?;
        if self.enabled.contains(&kind) {
            Ok(kind)
        } else {
            Err(MetricError::Disabled(kind))
        }
    }

    pub fn rank(&self, name: &str, x: &[u8], y: &[u8]) -> Result<f64, MetricError> {
        let kind = self.resolve(name)?;
        check_same_encoding(x, y)?;
        let metric = kind.metric();
        Ok(metric.rank_of(metric.calculate(x, y)))
    }
}

/// Rejects pairs where exactly one side is valid UTF-8.
fn check_same_encoding(x: &[u8], y: &[u8]) -> Result<(), MetricError> {
    let x_utf8 = std::str::from_utf8(x).is_ok();
    let y_utf8 = std::str::from_utf8(y).is_ok();
    if x_utf8 != y_utf8 {
        return Err(MetricError::InvalidArgument(format!(
            "encoding mismatch: {} is valid UTF-8, {} is not",
            if x_utf8 { "x" } else { "y" },
            if x_utf8 { "y" } else { "x" },
        )));
    }
    Ok(())
}
