//! Multi-pass summary reduction.
//!
//! Collapses arbitrarily long text to a target word count:
//!
//! 1. Per-chunk pass: each 512-word chunk is summarized independently
//!    and the chunk summaries are joined with single spaces.
//! 2. Convergence pass: while the combined summary exceeds the target,
//!    the whole current summary is re-summarized. The loop is capped
//!    (the model may be unable to shrink the text) and exits early
//!    when a pass makes no progress.
//! 3. Hard fallback: unconditional word-boundary truncation to the
//!    target, so the output bound holds even if convergence gave up.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::{SummarizeError, Summarizer};
use crate::text::{chunk_text, truncate_words, word_count, DEFAULT_CHUNK_WORDS};

/// Word ceiling handed to the capability for each chunk summary.
pub const CHUNK_SUMMARY_MAX_WORDS: usize = 250;

/// Extra words allowed per convergence pass above the target, giving
/// the model room to land under it.
pub const CONVERGENCE_HEADROOM_WORDS: usize = 200;

/// Default target word count for the final summary.
pub const DEFAULT_TARGET_WORDS: usize = 1000;

/// Default minimum word count handed to the capability.
pub const DEFAULT_MIN_WORDS: usize = 30;

/// Default ceiling on convergence passes.
pub const DEFAULT_MAX_PASSES: usize = 6;

/// Errors from summary reduction.
#[derive(Debug, Error)]
pub enum ReductionError {
    #[error("Summarization failed: {0}")]
    Summarize(#[from] SummarizeError),

    #[error("Invalid target length {target}: must be at least 1 and exceed min length {min}")]
    InvalidTarget { target: usize, min: usize },
}

/// Drives summarization passes until the text fits the target length.
pub struct SummaryReducer {
    summarizer: Arc<dyn Summarizer>,
    chunk_words: usize,
    chunk_summary_words: usize,
    max_passes: usize,
}

impl SummaryReducer {
    /// Create a reducer over a shared summarization capability.
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer,
            chunk_words: DEFAULT_CHUNK_WORDS,
            chunk_summary_words: CHUNK_SUMMARY_MAX_WORDS,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Set the per-chunk input word ceiling.
    pub fn with_chunk_words(mut self, chunk_words: usize) -> Self {
        self.chunk_words = chunk_words;
        self
    }

    /// Set the per-chunk summary word ceiling.
    pub fn with_chunk_summary_words(mut self, words: usize) -> Self {
        self.chunk_summary_words = words;
        self
    }

    /// Set the convergence pass ceiling.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Reduce `text` to at most `target_length` words.
    ///
    /// Empty input returns an empty summary without any capability
    /// calls. The output word count is always <= `target_length`; a
    /// failed capability call aborts the whole reduction.
    pub async fn reduce(
        &self,
        text: &str,
        target_length: usize,
        min_length: usize,
    ) -> Result<String, ReductionError> {
        if target_length == 0 || target_length <= min_length {
            return Err(ReductionError::InvalidTarget {
                target: target_length,
                min: min_length,
            });
        }

        if text.trim().is_empty() {
            return Ok(String::new());
        }

        // Per-chunk pass.
        let chunks = chunk_text(text, self.chunk_words);
        debug!(chunks = chunks.len(), "starting per-chunk pass");

        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            if chunk.trim().is_empty() {
                continue;
            }
            let summary = self
                .summarizer
                .summarize(chunk, self.chunk_summary_words, min_length)
                .await?;
            summaries.push(summary);
        }

        let mut current = summaries.join(" ");

        // Convergence pass, capped. A model that cannot shrink its
        // input would loop forever without the cap and the no-progress
        // check; truncation below holds the bound either way.
        let mut passes = 0;
        while word_count(&current) > target_length && passes < self.max_passes {
            passes += 1;
            debug!(
                pass = passes,
                words = word_count(&current),
                target = target_length,
                "convergence pass"
            );

            let reduced = self
                .summarizer
                .summarize(
                    &current,
                    target_length + CONVERGENCE_HEADROOM_WORDS,
                    min_length,
                )
                .await?;

            if word_count(&reduced) >= word_count(&current) {
                debug!(pass = passes, "pass made no progress, stopping");
                current = reduced;
                break;
            }
            current = reduced;
        }

        // Hard fallback: always reachable, holds the target bound.
        if word_count(&current) > target_length {
            debug!(
                words = word_count(&current),
                target = target_length,
                "truncating to target"
            );
            current = truncate_words(&current, target_length);
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    /// Shrinks input to at most `max_words` words, counting calls.
    struct ShrinkingSummarizer {
        calls: AtomicUsize,
    }

    impl ShrinkingSummarizer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Summarizer for ShrinkingSummarizer {
        async fn summarize(
            &self,
            text: &str,
            max_words: usize,
            _min_words: usize,
        ) -> Result<String, SummarizeError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            // Keep roughly half the input, bounded by the requested max.
            let keep = (word_count(text) / 2).clamp(1, max_words);
            Ok(truncate_words(text, keep))
        }
    }

    /// Always returns the same fixed-length text, never shrinking.
    struct StubbornSummarizer {
        output_words: usize,
        calls: AtomicUsize,
    }

    impl StubbornSummarizer {
        fn new(output_words: usize) -> Self {
            Self {
                output_words,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Summarizer for StubbornSummarizer {
        async fn summarize(
            &self,
            _text: &str,
            _max_words: usize,
            _min_words: usize,
        ) -> Result<String, SummarizeError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(words(self.output_words))
        }
    }

    /// Fails on every call.
    struct FailingSummarizer;

    #[async_trait::async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(
            &self,
            _text: &str,
            _max_words: usize,
            _min_words: usize,
        ) -> Result<String, SummarizeError> {
            Err(SummarizeError::Api("simulated failure".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_input_no_capability_calls() {
        let summarizer = Arc::new(ShrinkingSummarizer::new());
        let reducer = SummaryReducer::new(summarizer.clone());

        let out = reducer.reduce("", 1000, 30).await.unwrap();
        assert_eq!(out, "");
        assert_eq!(summarizer.calls.load(Ordering::Relaxed), 0);

        let out = reducer.reduce("   \n ", 1000, 30).await.unwrap();
        assert_eq!(out, "");
        assert_eq!(summarizer.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_target_bound_holds() {
        let reducer = SummaryReducer::new(Arc::new(ShrinkingSummarizer::new()));

        for (input_words, target) in [(50, 40), (600, 100), (2000, 1000), (3, 2)] {
            let out = reducer.reduce(&words(input_words), target, 1).await.unwrap();
            assert!(
                word_count(&out) <= target,
                "input={input_words} target={target} got={}",
                word_count(&out)
            );
            assert!(!out.is_empty());
        }
    }

    #[tokio::test]
    async fn test_600_words_makes_two_chunk_calls() {
        let summarizer = Arc::new(ShrinkingSummarizer::new());
        let reducer = SummaryReducer::new(summarizer.clone());

        // 600 words > 512 -> two chunks; each chunk summary is small
        // enough that no convergence pass is needed.
        let out = reducer.reduce(&words(600), 1000, 30).await.unwrap();
        assert_eq!(summarizer.calls.load(Ordering::Relaxed), 2);
        assert!(word_count(&out) <= 1000);
    }

    #[tokio::test]
    async fn test_stubborn_model_truncated_to_exact_target() {
        // Model always answers with 150 words; target is 100. The
        // convergence loop stops on the no-progress check and the
        // fallback truncates to exactly the first 100 words.
        let summarizer = Arc::new(StubbornSummarizer::new(150));
        let reducer = SummaryReducer::new(summarizer.clone());

        let out = reducer.reduce(&words(300), 100, 30).await.unwrap();
        assert_eq!(word_count(&out), 100);
        assert_eq!(out, truncate_words(&words(150), 100));

        // 1 chunk call + 1 convergence call that made no progress.
        assert_eq!(summarizer.calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_pass_cap_terminates() {
        // A summarizer that shrinks by one word per call would need
        // many passes; the cap bounds the calls and truncation still
        // enforces the target.
        struct SlowShrink {
            calls: AtomicUsize,
        }

        #[async_trait::async_trait]
        impl Summarizer for SlowShrink {
            async fn summarize(
                &self,
                text: &str,
                _max_words: usize,
                _min_words: usize,
            ) -> Result<String, SummarizeError> {
                self.calls.fetch_add(1, Ordering::Relaxed);
                let n = word_count(text).saturating_sub(1).max(1);
                Ok(truncate_words(text, n))
            }
        }

        let summarizer = Arc::new(SlowShrink {
            calls: AtomicUsize::new(0),
        });
        let reducer = SummaryReducer::new(summarizer.clone()).with_max_passes(3);

        let out = reducer.reduce(&words(200), 50, 10).await.unwrap();
        assert_eq!(word_count(&out), 50);
        // 1 chunk call + exactly 3 capped convergence passes.
        assert_eq!(summarizer.calls.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn test_capability_failure_aborts() {
        let reducer = SummaryReducer::new(Arc::new(FailingSummarizer));
        let err = reducer.reduce(&words(100), 50, 10).await.unwrap_err();
        assert!(matches!(err, ReductionError::Summarize(_)));
    }

    #[tokio::test]
    async fn test_invalid_target_rejected() {
        let reducer = SummaryReducer::new(Arc::new(ShrinkingSummarizer::new()));

        let err = reducer.reduce("some text", 0, 30).await.unwrap_err();
        assert!(matches!(err, ReductionError::InvalidTarget { .. }));

        // Target must exceed the minimum length.
        let err = reducer.reduce("some text", 30, 30).await.unwrap_err();
        assert!(matches!(err, ReductionError::InvalidTarget { .. }));
    }
}
