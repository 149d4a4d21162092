use std::io::BufRead;

use tracing::{debug_span, info};

use lookup_core::index::{IndexError, PrefixIndex};
use lookup_core::metric::{MetricError, MetricKind, MetricRegistry};
use lookup_core::settings::{self, Settings};
use lookup_core::suggest::{self, Suggestion};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Metric(#[from] MetricError),
}

/// Vocabulary index plus the metrics configured to rank against it.
///
/// Mutation needs `&mut self`; share behind a `RwLock` when readers and
/// the vocabulary owner live on different threads.
pub struct LookupEngine {
    index: PrefixIndex,
    registry: MetricRegistry,
    settings: Settings,
}

impl Default for LookupEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupEngine {
    /// Engine configured from the global settings.
    pub fn new() -> Self {
        Self::with_settings(settings::settings().clone())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            index: PrefixIndex::new(),
            registry: MetricRegistry::from_settings(&settings.metrics),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn default_metric(&self) -> MetricKind {
        self.settings.metrics.default_kind()
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.index.insert(word)
    }

    pub fn extend<S: AsRef<str>>(&mut self, words: impl IntoIterator<Item = S>) {
        self.index.extend(words);
    }

    /// Inserts one word per line, skipping blank lines. Returns how many
    /// words were new.
    pub fn load_vocabulary(&mut self, reader: impl BufRead) -> Result<usize, LookupError> {
        let _span = debug_span!("load_vocabulary").entered();
        let mut added = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if self.index.insert(&line) {
                added += 1;
            }
        }
        info!(added, total = self.index.len(), "vocabulary loaded");
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn match_prefix(&self, prefix: &str) -> Vec<String> {
        self.index.match_prefix(prefix)
    }

    pub fn complete<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>, LookupError> {
        Ok(self.index.complete(tokens)?)
    }

    pub fn rank(&self, metric: &str, x: &[u8], y: &[u8]) -> Result<f64, LookupError> {
        Ok(self.registry.rank(metric, x, y)?)
    }

    /// Suggestions for `query` using the configured default metric.
    pub fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, LookupError> {
        self.suggest_with(self.default_metric().name(), query)
    }

    pub fn suggest_with(&self, metric: &str, query: &str) -> Result<Vec<Suggestion>, LookupError> {
        Ok(suggest::suggest(
            &self.index,
            &self.registry,
            metric,
            query,
            &self.settings,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_core::settings::parse_settings_toml;

    fn engine() -> LookupEngine {
        let mut engine = LookupEngine::new();
        engine.extend(["give diamond", "give dirt", "gamemode creative", "gamemode survival"]);
        engine
    }

    fn sorted(mut words: Vec<String>) -> Vec<String> {
        words.sort();
        words
    }

    #[test]
    fn load_vocabulary_skips_blank_lines() {
        let mut engine = LookupEngine::new();
        let input = "give diamond\n\ngive dirt\n   \ngive diamond\nkick\n";
        assert_eq!(engine.load_vocabulary(input.as_bytes()).unwrap(), 3);
        assert_eq!(engine.len(), 3);
        assert!(engine.contains("kick"));
    }

    #[test]
    fn completes_command_arguments() {
        let engine = engine();
        assert_eq!(
            sorted(engine.complete(&["give", "d"]).unwrap()),
            vec!["diamond", "dirt"]
        );
        assert_eq!(
            sorted(engine.complete(&["gamemode", ""]).unwrap()),
            vec!["creative", "survival"]
        );
        assert!(engine.complete(&["nonexistent", "token"]).unwrap().is_empty());
    }

    #[test]
    fn suggest_uses_default_metric() {
        let engine = engine();
        assert_eq!(engine.default_metric(), MetricKind::JaroWinkler);
        let result = engine.suggest("gamemode survivl").unwrap();
        assert_eq!(result[0].word, "gamemode survival");
    }

    #[test]
    fn levenshtein_disabled_by_default() {
        let engine = engine();
        let err = engine.rank("levenshtein", b"dirt", b"dirty").unwrap_err();
        assert!(matches!(
            err,
            LookupError::Metric(MetricError::Disabled(MetricKind::Levenshtein))
        ));
        assert!(engine.rank("jaro_winkler", b"dirt", b"dirty").unwrap() < 0.0);
    }

    #[test]
    fn custom_settings_enable_levenshtein() {
        let toml = lookup_core::settings::default_toml().replace(
            "enabled = false",
            "enabled = true",
        );
        let engine = LookupEngine::with_settings(parse_settings_toml(&toml).unwrap());
        assert_eq!(engine.rank("levenshtein", b"dirt", b"dirt").unwrap(), 0.0);
        assert_eq!(engine.registry().enabled().count(), 2);
    }
}
