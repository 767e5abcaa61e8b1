//! Text normalization and chunking.
//!
//! Sits between raw page extraction and summarization:
//! - `cleaner`: strips decorative characters and blank lines
//! - `chunker`: splits text into word-bounded chunks for a
//!   bounded-context summarization model

mod chunker;
mod cleaner;

pub use chunker::{chunk_text, DEFAULT_CHUNK_WORDS};
pub use cleaner::{clean, clean_joined};

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncate to the first `max` whitespace-separated words.
///
/// Word-boundary truncation, no ellipsis. Returns the text unchanged
/// (modulo whitespace normalization) when it is already short enough.
pub fn truncate_words(text: &str, max: usize) -> String {
    text.split_whitespace()
        .take(max)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one two  three"), 3);
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("a b c d", 2), "a b");
        assert_eq!(truncate_words("a b", 10), "a b");
        assert_eq!(truncate_words("", 5), "");
    }
}
