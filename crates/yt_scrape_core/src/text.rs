use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("whitespace regex");
}

/// Replaces every run of whitespace (spaces, tabs, newlines) with a single space.
///
/// Runs at the start or end of the text become a single space as well; nothing is trimmed.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}
