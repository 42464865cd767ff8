//! String canonicalization shared by the exact and fuzzy matchers.

/// Characters that separate words in addition to whitespace.
const SEPARATORS: [char; 4] = ['-', '_', ',', '.'];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Lowercase `input` and collapse every run of whitespace and separator
/// characters into a single space, trimming both ends.
///
/// Never fails: empty or separator-only input yields an empty string, and
/// normalizing an already normalized string returns it unchanged.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .split(is_separator)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 8] = [
        "",
        "   ",
        "John Doe",
        "AG123123 01.04.20024 John -  Doe. str Marsweg 62a",
        "__--..,,",
        "  Mixed_Case-Name,  Here. ",
        "AG Иванов - Петров",
        "tab\tand\nnewline",
    ];

    #[test]
    fn lowercases_and_collapses_separators() {
        assert_eq!(
            normalize("AG123123 01.04.20024 John -  Doe. str Marsweg 62a"),
            "ag123123 01 04 20024 john doe str marsweg 62a"
        );
        assert_eq!(normalize("JOHN-DOE"), "john doe");
        assert_eq!(normalize("john_doe,jr."), "john doe jr");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(normalize("  -John Doe.  "), "john doe");
    }

    #[test]
    fn degenerate_input_becomes_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
        assert_eq!(normalize("-_,."), "");
    }

    #[test]
    fn lowercases_non_ascii() {
        assert_eq!(normalize("AG Иванов - Петров"), "ag иванов петров");
        assert_eq!(normalize("JÖHT"), "jöht");
    }

    #[test]
    fn is_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn output_has_no_uppercase_or_double_spaces() {
        for sample in SAMPLES {
            let normalized = normalize(sample);
            assert!(!normalized.contains("  "), "input: {sample:?}");
            assert!(!normalized.starts_with(' ') && !normalized.ends_with(' '));
            assert_eq!(normalized, normalized.to_lowercase());
        }
    }
}
