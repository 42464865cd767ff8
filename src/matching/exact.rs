use log::debug;

use super::{normalize::normalize, result::MatchResult};

/// Cheap pre-filter: `Identical` when the normalized `name` occurs anywhere
/// in the normalized `text`, word-aligned or not.
///
/// An empty normalized name is contained in every text.
#[must_use]
pub fn exact_match(name: &str, text: &str) -> MatchResult {
    let name = normalize(name);
    let text = normalize(text);

    if text.contains(&name) {
        debug!("Exact match: '{name}' found in '{text}'");
        MatchResult::Identical
    } else {
        MatchResult::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "AG123123 01.04.20024 John Doe. str Marsweg 62a";

    #[test]
    fn finds_name_after_normalization() {
        assert_eq!(exact_match("John Doe", TEXT), MatchResult::Identical);
        assert_eq!(exact_match("john doe", TEXT), MatchResult::Identical);
        assert_eq!(exact_match("JOHN-DOE", TEXT), MatchResult::Identical);
    }

    #[test]
    fn substring_need_not_be_word_aligned() {
        assert_eq!(exact_match("ohn do", TEXT), MatchResult::Identical);
    }

    #[test]
    fn near_misses_are_not_identical() {
        assert_eq!(exact_match("Jihn Doe", TEXT), MatchResult::NoMatch);
        assert_eq!(exact_match("00str Marsweg 62a", TEXT), MatchResult::NoMatch);
        assert_eq!(
            exact_match("00John Doe", "The client's name is John Doe."),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn empty_name_is_always_contained() {
        assert_eq!(exact_match("", TEXT), MatchResult::Identical);
        assert_eq!(exact_match(" - ", ""), MatchResult::Identical);
    }

    #[test]
    fn empty_text_never_contains_a_name() {
        assert_eq!(exact_match("John Doe", ""), MatchResult::NoMatch);
    }
}
