//! Default prompt for the Ollama summarizer.

/// Default summarization prompt.
///
/// Placeholders: `{max_words}`, `{min_words}`, `{content}`.
pub const DEFAULT_SUMMARY_PROMPT: &str = "\
You are a precise document summarizer. Write an abstractive summary of the \
text below in at most {max_words} words and at least {min_words} words. \
Preserve the key facts and their order. Respond with the summary text only, \
no preamble, no headings, no bullet points.

Text:
{content}";
