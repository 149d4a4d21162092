use super::{Metric, Polarity};

/// Longest shared prefix that earns the Winkler boost.
const MAX_PREFIX_LEN: usize = 4;
const SCALING_FACTOR: f64 = 0.1;

/// Jaro-Winkler similarity. Identical inputs (including two empty ones)
/// score 1.0, inputs with no byte in common score 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Metric for JaroWinkler {
    fn calculate(&self, x: &[u8], y: &[u8]) -> f64 {
        if x == y {
            return 1.0;
        }

        // Equal lengths are ordered by content so both argument orders run
        // the same greedy matching.
        let (min, max) = if (x.len(), x) <= (y.len(), y) {
            (x, y)
        } else {
            (y, x)
        };

        let radius = max.len() / 2;
        let mut used = vec![false; max.len()];
        let mut common = 0usize;
        let mut transpositions = 0usize;
        let mut previous: Option<usize> = None;

        for (i, &c) in min.iter().enumerate() {
            let start = i.saturating_sub(radius);
            let end = (i + radius).min(max.len());
            for j in start..end {
                if used[j] || max[j] != c {
                    continue;
                }
                used[j] = true;
                common += 1;
                if previous.is_some_and(|p| j < p) {
                    transpositions += 1;
                }
                previous = Some(j);
                break;
            }
        }

        if common == 0 {
            return 0.0;
        }

        let m = common as f64;
        let score = (m / min.len() as f64
            + m / max.len() as f64
            + (common - transpositions) as f64 / m)
            / 3.0;

        let prefix_len = x
            .iter()
            .zip(y)
            .take(MAX_PREFIX_LEN)
            .take_while(|(a, b)| a == b)
            .count();

        score + prefix_len as f64 * SCALING_FACTOR * (1.0 - score)
    }

    fn polarity(&self) -> Polarity {
        Polarity::Similarity
    }
}
