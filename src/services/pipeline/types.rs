//! Pipeline events and errors.

use thiserror::Error;

use crate::extract::{ExtractionError, PageTextMethod};
use crate::summarize::ReductionError;

/// Events emitted during a pipeline run.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Extraction started; the document has this many pages.
    ExtractionStarted { pages: u32 },
    /// One page's text was extracted.
    PageExtracted {
        page_index: u32,
        method: PageTextMethod,
        words: usize,
    },
    /// All pages extracted and cleaned.
    ExtractionComplete { words: usize },
    /// Summarization started over this many chunks.
    SummarizationStarted { chunks: usize },
    /// Final summary produced.
    SummarizationComplete { words: usize },
}

/// Errors from a pipeline run.
///
/// Any stage failure short-circuits the whole run; there is no
/// partial output and no retry.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Summary reduction failed: {0}")]
    Reduction(#[from] ReductionError),

    #[error("Pipeline task failed: {0}")]
    Task(String),
}
