use super::{Metric, Polarity};

/// Levenshtein distance divided by the longer input's length.
/// 0.0 for identical inputs (including two empty ones), 1.0 when no byte
/// can be kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

/// Unit-cost edit distance between `x` and `y`.
pub fn edit_distance(x: &[u8], y: &[u8]) -> usize {
    if x.is_empty() {
        return y.len();
    }
    if y.is_empty() {
        return x.len();
    }

    // Two rows instead of the full matrix.
    let mut prev: Vec<usize> = (0..=y.len()).collect();
    let mut curr = vec![0usize; y.len() + 1];

    for (i, &a) in x.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b) in y.iter().enumerate() {
            let cost = usize::from(a != b);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[y.len()]
}

impl Metric for Levenshtein {
    fn calculate(&self, x: &[u8], y: &[u8]) -> f64 {
        let longest = x.len().max(y.len());
        if longest == 0 {
            return 0.0;
        }
        edit_distance(x, y) as f64 / longest as f64
    }

    fn polarity(&self) -> Polarity {
        Polarity::Distance
    }
}
