use crate::Stopwords;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_TERM_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9 ]+").expect("valid regex");
}

/// Turn raw text into index terms: keep ASCII letters, digits and spaces,
/// lowercase, split on whitespace, drop stopwords. Order and duplicates are kept.
pub fn normalize(text: &str, stopwords: &Stopwords) -> Vec<String> {
    let cleaned = NON_TERM_CHARS.replace_all(text, "").to_ascii_lowercase();
    cleaned
        .split_whitespace()
        .filter(|term| !stopwords.contains(term))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        let sw = Stopwords::default();
        assert_eq!(normalize("Cat Dog!", &sw), vec!["cat", "dog"]);
        assert_eq!(normalize("don't  STOP-me", &sw), vec!["dont", "stopme"]);
    }

    #[test]
    fn non_ascii_is_removed_not_split() {
        let sw = Stopwords::default();
        assert_eq!(normalize("café\tbar", &sw), vec!["cafbar"]);
    }
}
