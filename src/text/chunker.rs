//! Word-bounded text chunking.
//!
//! Summarization models have a hard input ceiling; long documents are
//! split into chunks that respect it. Boundaries always fall between
//! words, never inside one.

/// Default maximum words per chunk, sized for a ~512-token summarizer
/// input window.
pub const DEFAULT_CHUNK_WORDS: usize = 512;

/// Split text into chunks of at most `max_words` words each.
///
/// Words are whitespace-separated; each chunk joins its words with
/// single spaces. Every chunk except possibly the last holds exactly
/// `max_words` words. Chunking is lossless: concatenating the chunks'
/// words in order reproduces the input word sequence. Empty input
/// yields an empty vec.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let max_words = max_words.max(1);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::with_capacity(max_words.min(1024));

    for word in text.split_whitespace() {
        current.push(word);
        if current.len() >= max_words {
            chunks.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk_text("", 512).is_empty());
        assert!(chunk_text("  \n\t ", 512).is_empty());
    }

    #[test]
    fn test_single_short_chunk() {
        let chunks = chunk_text("one two three", 512);
        assert_eq!(chunks, vec!["one two three"]);
    }

    #[test]
    fn test_exact_boundary() {
        let chunks = chunk_text(&words(1024), 512);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].split_whitespace().count(), 512);
        assert_eq!(chunks[1].split_whitespace().count(), 512);
    }

    #[test]
    fn test_trailing_partial_chunk() {
        let chunks = chunk_text(&words(600), 512);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].split_whitespace().count(), 512);
        assert_eq!(chunks[1].split_whitespace().count(), 88);
    }

    #[test]
    fn test_round_trip_preserves_word_sequence() {
        for (n, max) in [(0, 1), (1, 1), (7, 3), (600, 512), (1025, 512)] {
            let input = words(n);
            let chunks = chunk_text(&input, max);

            // Every chunk but the last is exactly max words; the last is 1..=max.
            for (i, chunk) in chunks.iter().enumerate() {
                let count = chunk.split_whitespace().count();
                if i + 1 < chunks.len() {
                    assert_eq!(count, max);
                } else {
                    assert!(count >= 1 && count <= max);
                }
            }

            let rejoined: Vec<&str> = chunks
                .iter()
                .flat_map(|c| c.split_whitespace())
                .collect();
            let original: Vec<&str> = input.split_whitespace().collect();
            assert_eq!(rejoined, original, "n={n} max={max}");
        }
    }

    #[test]
    fn test_zero_max_treated_as_one() {
        let chunks = chunk_text("a b c", 0);
        assert_eq!(chunks, vec!["a", "b", "c"]);
    }
}
