//! Abstractive summarization.
//!
//! The summarization model is a black-box capability behind the
//! [`Summarizer`] trait: text in, bounded summary out. The built-in
//! implementation talks to a local Ollama instance. [`SummaryReducer`]
//! drives the capability over arbitrarily long documents: a per-chunk
//! pass followed by a capped convergence loop and an unconditional
//! word-boundary truncation fallback.

mod config;
mod ollama;
mod prompts;
mod reducer;

use async_trait::async_trait;
use thiserror::Error;

pub use config::SummarizerConfig;
pub use ollama::OllamaSummarizer;
pub use reducer::{
    ReductionError, SummaryReducer, CHUNK_SUMMARY_MAX_WORDS, CONVERGENCE_HEADROOM_WORDS,
    DEFAULT_MAX_PASSES, DEFAULT_MIN_WORDS, DEFAULT_TARGET_WORDS,
};

/// Errors from summarization capability calls.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Trait for summarization capabilities.
///
/// Implementations must be deterministic for a given input (no
/// sampling) and are shared read-only across the pipeline: construct
/// once at startup, pass by reference.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce an abstractive summary of `text`, targeting at most
    /// `max_words` and at least `min_words` words.
    ///
    /// The bounds are advisory for the model; callers that need a hard
    /// ceiling enforce it themselves (see [`SummaryReducer`]).
    async fn summarize(
        &self,
        text: &str,
        max_words: usize,
        min_words: usize,
    ) -> Result<String, SummarizeError>;
}
