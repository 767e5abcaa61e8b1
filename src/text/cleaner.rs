//! Raw text cleanup.
//!
//! Extracted PDF text is full of decorative noise: bullet glyphs,
//! checkmarks, markdown-ish markers, and blank lines. The cleaner
//! strips those so the summarizer sees prose only.

use std::sync::OnceLock;

use regex::Regex;

/// Decorative characters removed from every line.
const DECORATIVE_PATTERN: &str = r"[*\-#:•✔✓▶●@]";

fn decorative_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DECORATIVE_PATTERN).unwrap())
}

/// Clean raw extracted text into a sequence of non-empty lines.
///
/// Splits on line breaks, removes every occurrence of the decorative
/// character set from each line (literal character class, not
/// word-boundary aware), trims surrounding whitespace, and drops lines
/// that end up empty. Total function: never fails, always idempotent.
pub fn clean(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| decorative_re().replace_all(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Clean raw text and join the surviving lines with single spaces.
pub fn clean_joined(raw: &str) -> String {
    clean(raw).join(" ")
}
