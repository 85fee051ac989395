//! Utilities functions which do not linked to domain

/// Split a character from the beginning or the end of a string
pub(crate) trait SplitChar<'a> {
    /// Split into the first character and the rest of the string
    fn split_first_char(self) -> Option<(char, &'a str)>;
    /// Split into the rest of the string and the last character
    fn split_last_char(self) -> Option<(&'a str, char)>;
}

impl<'a> SplitChar<'a> for &'a str {
    fn split_first_char(self) -> Option<(char, &'a str)> {
        let mut chars = self.chars();
        chars.next().map(|head| (head, chars.as_str()))
    }

    fn split_last_char(self) -> Option<(&'a str, char)> {
        let mut chars = self.chars();
        chars.next_back().map(|tail| (chars.as_str(), tail))
    }
}

/// Replace every run of whitespace with a single space
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop the trailing zeros of a decimal fraction and the dangling dot:
/// `47.500` -> `47.5`, `47.000` -> `47`.
///
/// Strings without the decimal dot are returned as is,
/// so the zeros of an integer are never touched.
pub(crate) fn trim_fraction_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }

    s.trim_end_matches('0').trim_end_matches('.')
}
