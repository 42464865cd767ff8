//! Similarity primitives scaled to `0..=100`.

use serde::Serialize;
use strum::{Display, EnumString, VariantNames};
use unicode_normalization::UnicodeNormalization;

/// Similarity metric used to score a window against a name.
///
/// Inputs are compared in canonical decomposition (NFD), so `ö` and `o`
/// differ by a single combining mark.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, VariantNames, Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Conventional fuzzy ratio: `2 * LCS / (len(a) + len(b))`, i.e. one
    /// minus the insertion/deletion distance over the combined length.
    #[default]
    Ratio,
    /// `strsim::normalized_levenshtein`.
    Levenshtein,
    /// `strsim::jaro_winkler`.
    JaroWinkler,
}

impl Scorer {
    /// Score `a` against `b`. Identical strings (including two empty ones)
    /// score 100 with every metric.
    #[must_use]
    pub fn score(self, a: &str, b: &str) -> u8 {
        let similarity = match self {
            Scorer::Ratio => {
                let a: Vec<char> = a.nfd().collect();
                let b: Vec<char> = b.nfd().collect();
                ratio(&a, &b)
            }
            Scorer::Levenshtein => strsim::normalized_levenshtein(&decompose(a), &decompose(b)),
            Scorer::JaroWinkler => strsim::jaro_winkler(&decompose(a), &decompose(b)),
        };
        to_percent(similarity)
    }
}

fn decompose(s: &str) -> String {
    s.nfd().collect()
}

#[allow(clippy::cast_precision_loss)]
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_len(a, b)) as f64 / total as f64
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Scale to 0..=100, rounding halves to the even integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(similarity: f64) -> u8 {
    (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}
