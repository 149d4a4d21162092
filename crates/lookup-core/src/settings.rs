//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::metric::MetricKind;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
///
/// Fails with `AlreadyInitialized` once `settings()` has been read, since
/// the custom values could no longer take effect.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if INSTANCE.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub metrics: MetricsSettings,
    pub suggest: SuggestSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// Snake-case name of the metric used when none is given.
    pub default: String,
    pub jaro_winkler: MetricSettings,
    pub levenshtein: MetricSettings,
}

impl MetricsSettings {
    pub fn get(&self, kind: MetricKind) -> &MetricSettings {
        match kind {
            MetricKind::JaroWinkler => &self.jaro_winkler,
            MetricKind::Levenshtein => &self.levenshtein,
        }
    }

    /// The configured default metric. Validated at parse time.
    pub fn default_kind(&self) -> MetricKind {
        self.default.parse().unwrap_or(MetricKind::JaroWinkler)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MetricSettings {
    pub enabled: bool,
    /// Near-match cutoff, read in the metric's own polarity.
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestSettings {
    pub max_results: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_unit_interval {
        ($section:ident . $metric:ident . $field:ident) => {
            let value = s.$section.$metric.$field;
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::InvalidValue {
                    field: concat!(
                        stringify!($section),
                        ".",
                        stringify!($metric),
                        ".",
                        stringify!($field)
                    )
                    .to_string(),
                    reason: "must be within [0, 1]".to_string(),
                });
            }
        };
    }

    check_unit_interval!(metrics.jaro_winkler.threshold);
    check_unit_interval!(metrics.levenshtein.threshold);

    if s.suggest.max_results == 0 {
        return Err(SettingsError::InvalidValue {
            field: "suggest.max_results".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let kind: MetricKind = s
        .metrics
        .default
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            field: "metrics.default".to_string(),
            reason: format!("unknown metric '{}'", s.metrics.default),
        })?;
    if !s.metrics.get(kind).enabled {
        return Err(SettingsError::InvalidValue {
            field: "metrics.default".to_string(),
            reason: format!("metric '{}' is disabled", kind),
        });
    }

    Ok(())
}
