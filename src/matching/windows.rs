//! Contiguous word-window enumeration.

/// Iterator over every contiguous run of words, joined with single spaces.
///
/// Windows come out start-index-major: all windows beginning at word 0 in
/// increasing length, then those beginning at word 1, and so on. For `w`
/// words that is `w * (w + 1) / 2` windows unless `max_len` caps them.
#[derive(Debug, Clone)]
pub struct WordWindows<'a> {
    words: &'a [&'a str],
    max_len: usize,
    start: usize,
    len: usize,
}

impl<'a> WordWindows<'a> {
    #[must_use]
    pub fn new(words: &'a [&'a str]) -> Self {
        Self::with_max_len(words, None)
    }

    /// Limit windows to at most `max_len` words (`None` means unbounded).
    /// A limit of zero is treated as one.
    #[must_use]
    pub fn with_max_len(words: &'a [&'a str], max_len: Option<usize>) -> Self {
        Self {
            words,
            max_len: max_len.unwrap_or(usize::MAX).max(1),
            start: 0,
            len: 1,
        }
    }
}

impl Iterator for WordWindows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while self.start < self.words.len() {
            let end = self.start + self.len;
            if self.len <= self.max_len && end <= self.words.len() {
                self.len += 1;
                return Some(self.words[self.start..end].join(" "));
            }
            self.start += 1;
            self.len = 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_start_major_then_length() {
        let words = ["a", "b", "c"];
        let windows: Vec<String> = WordWindows::new(&words).collect();
        assert_eq!(windows, vec!["a", "a b", "a b c", "b", "b c", "c"]);
    }

    #[test]
    fn yields_triangular_count() {
        let words = ["w1", "w2", "w3", "w4", "w5", "w6", "w7"];
        assert_eq!(WordWindows::new(&words).count(), 7 * 8 / 2);
    }

    #[test]
    fn empty_word_list_yields_nothing() {
        let words: [&str; 0] = [];
        assert_eq!(WordWindows::new(&words).next(), None);
    }

    #[test]
    fn max_len_caps_window_size() {
        let words = ["a", "b", "c", "d"];
        let windows: Vec<String> = WordWindows::with_max_len(&words, Some(2)).collect();
        assert_eq!(windows, vec!["a", "a b", "b", "b c", "c", "c d", "d"]);
    }

    #[test]
    fn zero_max_len_means_single_words() {
        let words = ["a", "b"];
        let windows: Vec<String> = WordWindows::with_max_len(&words, Some(0)).collect();
        assert_eq!(windows, vec!["a", "b"]);
    }
}
