//! Fuzzy search for a name among the word windows of a text.

use log::debug;
use serde::Serialize;
use strum::{Display, EnumString, VariantNames};

use super::{normalize::normalize, result::MatchResult, score::Scorer, windows::WordWindows};

/// Minimum score accepted by [`find_name_in_string`] callers that do not
/// pick their own threshold.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Which window wins when several reach the threshold.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, VariantNames, Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// First window in scan order (smallest start index, then shortest).
    #[default]
    First,
    /// Highest-scoring window; ties keep the earliest one.
    Best,
}

/// Configurable name-in-text matcher.
///
/// Scanning is quadratic in the number of words of the text, so it is meant
/// for short texts such as filenames or single-line document headers.
/// `max_window` bounds the window length when longer texts must be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Matcher {
    threshold: u8,
    strategy: MatchStrategy,
    scorer: Scorer,
    max_window: Option<usize>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            strategy: MatchStrategy::default(),
            scorer: Scorer::default(),
            max_window: None,
        }
    }
}

impl Matcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Thresholds above 100 can never be reached.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_max_window(mut self, max_window: Option<usize>) -> Self {
        self.max_window = max_window;
        self
    }

    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    #[must_use]
    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    #[must_use]
    pub fn scorer(&self) -> Scorer {
        self.scorer
    }

    /// Search `text` for `name`. Both are normalized first; every contiguous
    /// word window of the text is scored against the name.
    #[must_use]
    pub fn find(&self, name: &str, text: &str) -> MatchResult {
        let name = normalize(name);
        let text = normalize(text);
        let words: Vec<&str> = if text.is_empty() {
            Vec::new()
        } else {
            text.split(' ').collect()
        };

        let mut best: Option<(u8, String)> = None;

        for window in WordWindows::with_max_len(&words, self.max_window) {
            let score = self.scorer.score(&name, &window);
            if score < self.threshold {
                continue;
            }

            match self.strategy {
                MatchStrategy::First => {
                    debug!("Fuzzy hit (name='{name}', window='{window}', score={score})");
                    return MatchResult::Fuzzy { score, window };
                }
                MatchStrategy::Best => {
                    let is_better = best
                        .as_ref()
                        .is_none_or(|(best_score, _)| score > *best_score);

                    if is_better {
                        debug!("New best window: '{window}' (score: {score})");
                        best = Some((score, window));
                        if score == 100 {
                            break;
                        }
                    }
                }
            }
        }

        best.map_or(MatchResult::NoMatch, |(score, window)| MatchResult::Fuzzy {
            score,
            window,
        })
    }
}

/// Search `text` for `name` with the default scorer and first-match
/// strategy, accepting the first window scoring at least `threshold`.
#[must_use]
pub fn find_name_in_string(name: &str, text: &str, threshold: u8) -> MatchResult {
    Matcher::new().with_threshold(threshold).find(name, text)
}
