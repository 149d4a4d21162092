//! Typo-tolerant lookup: exact prefix matches first, then near-matches
//! from the rest of the vocabulary ranked by a registry metric.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::index::PrefixIndex;
use crate::metric::{MetricError, MetricRegistry};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub word: String,
    /// `None` for exact prefix matches, otherwise the registry rank
    /// (lower is better).
    pub rank: Option<f64>,
}

/// Suggests up to `settings.suggest.max_results` words for `query`.
///
/// Words having `query` as a prefix come first in lexicographic order.
/// The remaining slots go to words whose `metric` score against `query`
/// passes that metric's configured threshold, best rank first.
pub fn suggest(
    index: &PrefixIndex,
    registry: &MetricRegistry,
    metric: &str,
    query: &str,
    settings: &Settings,
) -> Result<Vec<Suggestion>, MetricError> {
    let _span = debug_span!("suggest", query, metric).entered();
    let kind = registry.resolve(metric)?;
    let threshold = settings.metrics.get(kind).threshold;
    let max_results = settings.suggest.max_results;

    let mut exact = index.match_prefix(query);
    exact.sort();
    let mut seen: HashSet<String> = exact.iter().cloned().collect();
    let mut suggestions: Vec<Suggestion> = exact
        .into_iter()
        .take(max_results)
        .map(|word| Suggestion { word, rank: None })
        .collect();

    if suggestions.len() < max_results {
        let scorer = kind.metric();
        let mut near: Vec<Suggestion> = index
            .match_prefix("")
            .into_iter()
            .filter(|word| seen.insert(word.clone()))
            .filter_map(|word| {
                let score = scorer.calculate(query.as_bytes(), word.as_bytes());
                scorer.accepts(score, threshold).then(|| Suggestion {
                    word,
                    rank: Some(scorer.rank_of(score)),
                })
            })
            .collect();
        near.sort_by(|a, b| {
            a.rank
                .partial_cmp(&b.rank)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.word.cmp(&b.word))
        });
        debug!(exact = suggestions.len(), near = near.len());
        near.truncate(max_results - suggestions.len());
        suggestions.extend(near);
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricKind;
    use crate::settings::parse_settings_toml;

    fn settings(max_results: usize) -> Settings {
        parse_settings_toml(&format!(
            r#"
[metrics]
default = "jaro_winkler"

[metrics.jaro_winkler]
enabled = true
threshold = 0.8

[metrics.levenshtein]
enabled = true
threshold = 0.34

[suggest]
max_results = {max_results}
"#
        ))
        .unwrap()
    }

    fn vocab() -> PrefixIndex {
        ["creative", "survival", "spectator", "adventure", "diamond", "dirt", "diorite"]
            .into_iter()
            .collect()
    }

    fn words(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.word.as_str()).collect()
    }

    #[test]
    fn exact_prefix_matches_come_first() {
        let registry = MetricRegistry::new(MetricKind::ALL);
        let result = suggest(&vocab(), &registry, "jaro_winkler", "di", &settings(10)).unwrap();
        assert_eq!(&words(&result)[..3], &["diamond", "diorite", "dirt"]);
        assert!(result[..3].iter().all(|s| s.rank.is_none()));
    }

    #[test]
    fn typo_finds_near_match() {
        let registry = MetricRegistry::new(MetricKind::ALL);
        for metric in ["jaro_winkler", "levenshtein"] {
            let result = suggest(&vocab(), &registry, metric, "creativ", &settings(10)).unwrap();
            assert_eq!(words(&result), vec!["creative"], "{metric}");

            let result = suggest(&vocab(), &registry, metric, "survivl", &settings(10)).unwrap();
            assert_eq!(result[0].word, "survival", "{metric}");
            assert!(result[0].rank.is_some());
        }
    }

    #[test]
    fn near_matches_sorted_by_rank() {
        let registry = MetricRegistry::new(MetricKind::ALL);
        let result = suggest(&vocab(), &registry, "jaro_winkler", "dirx", &settings(10)).unwrap();
        let ranks: Vec<f64> = result.iter().filter_map(|s| s.rank).collect();
        assert!(!ranks.is_empty());
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result[0].word, "dirt");
    }

    #[test]
    fn near_match_rank_agrees_with_registry() {
        let registry = MetricRegistry::new(MetricKind::ALL);
        for metric in ["jaro_winkler", "levenshtein"] {
            let result = suggest(&vocab(), &registry, metric, "survivl", &settings(10)).unwrap();
            assert!(!result.is_empty(), "{metric}");
            for s in &result {
                let expected = registry.rank(metric, b"survivl", s.word.as_bytes()).unwrap();
                assert_eq!(s.rank, Some(expected), "{metric}: {}", s.word);
            }
        }
    }

    #[test]
    fn respects_max_results() {
        let registry = MetricRegistry::new(MetricKind::ALL);
        let result = suggest(&vocab(), &registry, "jaro_winkler", "", &settings(2)).unwrap();
        assert_eq!(words(&result), vec!["adventure", "creative"]);
    }

    #[test]
    fn disabled_metric_is_rejected() {
        let registry = MetricRegistry::new([MetricKind::JaroWinkler]);
        let err = suggest(&vocab(), &registry, "levenshtein", "dirt", &settings(5)).unwrap_err();
        assert_eq!(err, MetricError::Disabled(MetricKind::Levenshtein));
    }
}
