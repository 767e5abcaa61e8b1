//! Document summarization pipeline.
//!
//! Composes the stages over a whole document: per-page extraction
//! (native text or OCR fallback) into a raw accumulator, cleaning,
//! and multi-pass summary reduction. One run is processed start to
//! finish; the first stage failure aborts it.

mod types;

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

use crate::config::PipelineConfig;
use crate::extract::{ExtractionError, PageReader, PageTextExtractor};
use crate::ocr::OcrEngine;
use crate::summarize::{SummaryReducer, Summarizer};
use crate::text::{clean_joined, word_count};

pub use types::{PipelineError, PipelineEvent};

/// The extraction → cleaning → chunking → reduction pipeline.
///
/// Holds the shared capability services (OCR engine, summarizer),
/// which are expensive to construct: build one `Pipeline` at startup
/// and reuse it. A single-flight gate serializes summarizer use so
/// concurrent callers never stack inference requests on the shared
/// model.
pub struct Pipeline {
    ocr: Arc<dyn OcrEngine>,
    reducer: SummaryReducer,
    config: PipelineConfig,
    inference_gate: Semaphore,
}

impl Pipeline {
    /// Build a pipeline over shared capability services.
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        summarizer: Arc<dyn Summarizer>,
        config: PipelineConfig,
    ) -> Self {
        let reducer = SummaryReducer::new(summarizer)
            .with_chunk_words(config.chunk_words)
            .with_chunk_summary_words(config.chunk_summary_words)
            .with_max_passes(config.max_passes);

        Self {
            ocr,
            reducer,
            config,
            inference_gate: Semaphore::new(1),
        }
    }

    /// Pipeline settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over a document.
    ///
    /// Pages are extracted in order and concatenated directly (no
    /// separators), cleaned, then reduced to at most `target_length`
    /// words. Progress is reported on `event_tx`; a closed receiver
    /// does not fail the run.
    pub async fn run(
        &self,
        reader: Arc<dyn PageReader>,
        target_length: usize,
        event_tx: mpsc::Sender<PipelineEvent>,
    ) -> Result<String, PipelineError> {
        // Extraction is blocking work (external tools), so it runs off
        // the async executor.
        let ocr = self.ocr.clone();
        let tx = event_tx.clone();
        let raw = tokio::task::spawn_blocking(move || -> Result<String, ExtractionError> {
            let extractor = PageTextExtractor::new(ocr);
            let page_count = reader.page_count()?;
            let _ = tx.blocking_send(PipelineEvent::ExtractionStarted { pages: page_count });

            let mut raw = String::new();
            for page_index in 0..page_count {
                let page = extractor.extract_page(reader.as_ref(), page_index)?;
                let _ = tx.blocking_send(PipelineEvent::PageExtracted {
                    page_index,
                    method: page.method,
                    words: word_count(&page.text),
                });
                raw.push_str(&page.text);
            }

            Ok(raw)
        })
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))??;

        let cleaned = clean_joined(&raw);
        let cleaned_words = word_count(&cleaned);
        let _ = event_tx
            .send(PipelineEvent::ExtractionComplete {
                words: cleaned_words,
            })
            .await;

        let chunk_count = cleaned_words.div_ceil(self.config.chunk_words.max(1));
        let _ = event_tx
            .send(PipelineEvent::SummarizationStarted {
                chunks: chunk_count,
            })
            .await;

        // Single-flight around the shared summarization model.
        let _permit = self
            .inference_gate
            .acquire()
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))?;

        let summary = self
            .reducer
            .reduce(&cleaned, target_length, self.config.min_length)
            .await?;

        let _ = event_tx
            .send(PipelineEvent::SummarizationComplete {
                words: word_count(&summary),
            })
            .await;

        Ok(summary)
    }
}
