use serde::Serialize;

/// Outcome of evaluating one name against one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    /// The normalized name occurs verbatim in the normalized text.
    Identical,
    /// A word window reached the threshold.
    Fuzzy {
        /// Similarity in `0..=100`.
        score: u8,
        /// The normalized window that produced the score.
        window: String,
    },
    /// Nothing reached the threshold.
    NoMatch,
}

impl MatchResult {
    /// Marker reported for the exact-match path.
    pub const IDENTICAL_MARKER: &'static str = "Identical";

    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }

    /// Score in `0..=100`; `Identical` counts as 100 and `NoMatch` as 0.
    #[must_use]
    pub fn score(&self) -> u8 {
        match self {
            MatchResult::Identical => 100,
            MatchResult::Fuzzy { score, .. } => *score,
            MatchResult::NoMatch => 0,
        }
    }

    #[must_use]
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            MatchResult::Identical => Some(Self::IDENTICAL_MARKER),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_and_flags() {
        assert!(MatchResult::Identical.is_match());
        assert_eq!(MatchResult::Identical.score(), 100);
        assert_eq!(MatchResult::Identical.marker(), Some("Identical"));

        let fuzzy = MatchResult::Fuzzy {
            score: 82,
            window: "john doe".to_string(),
        };
        assert!(fuzzy.is_match());
        assert_eq!(fuzzy.score(), 82);
        assert_eq!(fuzzy.marker(), None);

        assert!(!MatchResult::NoMatch.is_match());
        assert_eq!(MatchResult::NoMatch.score(), 0);
    }

    #[test]
    fn serializes_with_kind_tag() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(MatchResult::Fuzzy {
            score: 94,
            window: "str marsweg 62a".to_string(),
        })?;
        assert_eq!(value["kind"], "fuzzy");
        assert_eq!(value["score"], 94);
        assert_eq!(value["window"], "str marsweg 62a");
        Ok(())
    }
}
