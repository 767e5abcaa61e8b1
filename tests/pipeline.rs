//! End-to-end pipeline scenarios over fake documents and capabilities.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use lector::config::PipelineConfig;
use lector::extract::{ExtractionError, PageReader, PageTextMethod};
use lector::ocr::{OcrEngine, OcrError};
use lector::services::{Pipeline, PipelineEvent};
use lector::summarize::{SummarizeError, Summarizer};
use lector::text::{truncate_words, word_count};
use lector::tts::{SpeechSynthesizer, SynthesisError};

/// Fake document whose scanned pages carry their OCR fragments in the
/// rasterized "image" file.
struct FakeDocument {
    native: Vec<String>,
    scanned: Vec<Vec<String>>,
}

impl FakeDocument {
    fn new(pages: Vec<(&str, Vec<&str>)>) -> Self {
        Self {
            native: pages.iter().map(|(n, _)| n.to_string()).collect(),
            scanned: pages
                .iter()
                .map(|(_, s)| s.iter().map(|f| f.to_string()).collect())
                .collect(),
        }
    }
}

impl PageReader for FakeDocument {
    fn page_count(&self) -> Result<u32, ExtractionError> {
        Ok(self.native.len() as u32)
    }

    fn native_text(&self, page_index: u32) -> Result<String, ExtractionError> {
        Ok(self.native[page_index as usize].clone())
    }

    fn rasterize_page(
        &self,
        page_index: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, ExtractionError> {
        let path = output_dir.join(format!("page-{:02}.png", page_index + 1));
        std::fs::write(&path, self.scanned[page_index as usize].join("\n"))?;
        Ok(path)
    }
}

/// Fake OCR engine: fragments are the lines of the "image" file.
struct LineFileEngine;

impl OcrEngine for LineFileEngine {
    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "fake".to_string()
    }

    fn recognize(&self, image_path: &Path) -> Result<Vec<String>, OcrError> {
        let raw = std::fs::read_to_string(image_path)?;
        Ok(raw
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect())
    }
}

/// Summarizer that records its inputs and shrinks each to a bounded
/// size.
struct RecordingSummarizer {
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl RecordingSummarizer {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_words: usize,
        _min_words: usize,
    ) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inputs.lock().unwrap().push(text.to_string());
        let keep = (word_count(text) / 4).clamp(1, max_words);
        Ok(truncate_words(text, keep))
    }
}

/// Summarizer that always answers with the same fixed-length text.
struct StubbornSummarizer {
    output_words: usize,
}

#[async_trait]
impl Summarizer for StubbornSummarizer {
    async fn summarize(
        &self,
        _text: &str,
        _max_words: usize,
        _min_words: usize,
    ) -> Result<String, SummarizeError> {
        let out: Vec<String> = (0..self.output_words).map(|i| format!("s{i}")).collect();
        Ok(out.join(" "))
    }
}

/// Synthesizer that always fails, for isolation tests.
struct FailingSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FailingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, SynthesisError> {
        Err(SynthesisError::Service("simulated outage".to_string()))
    }
}

fn pipeline_with(summarizer: Arc<dyn Summarizer>) -> Pipeline {
    Pipeline::new(
        Arc::new(LineFileEngine),
        summarizer,
        PipelineConfig::default(),
    )
}

fn drain_events(mut rx: mpsc::Receiver<PipelineEvent>) -> Vec<PipelineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn long_native_page(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn mixed_document_uses_native_and_ocr_in_page_order() {
    // 3 pages: native, scanned, native.
    let doc = FakeDocument::new(vec![
        ("Opening chapter text.\n", vec![]),
        ("   ", vec!["Scanned", "middle", "page"]),
        ("Closing chapter text.\n", vec![]),
    ]);

    let summarizer = Arc::new(RecordingSummarizer::new());
    let pipeline = pipeline_with(summarizer.clone());

    let (tx, rx) = mpsc::channel(100);
    let summary = pipeline.run(Arc::new(doc), 1000, tx).await.unwrap();
    assert!(!summary.is_empty());

    let events = drain_events(rx);
    let methods: Vec<PageTextMethod> = events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::PageExtracted { method, .. } => Some(*method),
            _ => None,
        })
        .collect();
    assert_eq!(
        methods,
        vec![
            PageTextMethod::NativeLayer,
            PageTextMethod::Ocr,
            PageTextMethod::NativeLayer
        ]
    );

    // The summarizer saw the cleaned concatenation in page order.
    let inputs = summarizer.inputs.lock().unwrap();
    assert_eq!(inputs.len(), 1);
    let opening = inputs[0].find("Opening").unwrap();
    let scanned = inputs[0].find("Scanned middle page").unwrap();
    let closing = inputs[0].find("Closing").unwrap();
    assert!(opening < scanned && scanned < closing);
}

#[tokio::test]
async fn six_hundred_word_document_summarizes_in_two_chunks() {
    // 600 cleaned words exceed the 512-word chunk ceiling by one
    // partial chunk; each chunk summary is small enough that no
    // convergence pass runs.
    let page = long_native_page(600);
    let doc = FakeDocument::new(vec![(page.as_str(), vec![])]);

    let summarizer = Arc::new(RecordingSummarizer::new());
    let pipeline = pipeline_with(summarizer.clone());

    let (tx, rx) = mpsc::channel(100);
    let summary = pipeline.run(Arc::new(doc), 1000, tx).await.unwrap();

    assert_eq!(summarizer.calls.load(Ordering::Relaxed), 2);
    assert!(word_count(&summary) <= 1000);

    let events = drain_events(rx);
    assert!(events.iter().any(|e| matches!(
        e,
        PipelineEvent::SummarizationStarted { chunks: 2 }
    )));
}

#[tokio::test]
async fn stubborn_summary_truncates_to_exact_target() {
    // The model keeps answering 150 words against a target of 100;
    // the hard fallback truncates to exactly the first 100 words.
    let page = long_native_page(300);
    let doc = FakeDocument::new(vec![(page.as_str(), vec![])]);

    let pipeline = pipeline_with(Arc::new(StubbornSummarizer { output_words: 150 }));

    let (tx, _rx) = mpsc::channel(100);
    let summary = pipeline.run(Arc::new(doc), 100, tx).await.unwrap();

    assert_eq!(word_count(&summary), 100);
    assert!(summary.starts_with("s0 s1 "));
    assert!(summary.ends_with("s99"));
}

#[tokio::test]
async fn empty_document_gives_empty_summary_without_model_calls() {
    let doc = FakeDocument::new(vec![("   ", vec![])]);

    let summarizer = Arc::new(RecordingSummarizer::new());
    let pipeline = pipeline_with(summarizer.clone());

    let (tx, _rx) = mpsc::channel(100);
    let summary = pipeline.run(Arc::new(doc), 1000, tx).await.unwrap();

    assert_eq!(summary, "");
    assert_eq!(summarizer.calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn decorative_characters_never_reach_the_summarizer() {
    let doc = FakeDocument::new(vec![(
        "• Budget: review\n✔ Done items\n### Heading ###\nPlain line",
        vec![],
    )]);

    let summarizer = Arc::new(RecordingSummarizer::new());
    let pipeline = pipeline_with(summarizer.clone());

    let (tx, _rx) = mpsc::channel(100);
    pipeline.run(Arc::new(doc), 1000, tx).await.unwrap();

    let inputs = summarizer.inputs.lock().unwrap();
    for c in ['*', '-', '#', ':', '•', '✔', '✓', '▶', '●', '@'] {
        assert!(!inputs[0].contains(c), "found {c:?} in summarizer input");
    }
    assert!(inputs[0].contains("Budget review"));
}

#[tokio::test]
async fn synthesis_failure_leaves_summary_available() {
    let doc = FakeDocument::new(vec![("A short but real document page.", vec![])]);

    let pipeline = pipeline_with(Arc::new(RecordingSummarizer::new()));
    let (tx, _rx) = mpsc::channel(100);
    let summary = pipeline.run(Arc::new(doc), 1000, tx).await.unwrap();
    assert!(!summary.is_empty());

    // Synthesis fails independently; the summary is untouched.
    let synthesizer = FailingSynthesizer;
    let err = synthesizer.synthesize(&summary).await.unwrap_err();
    assert!(matches!(err, SynthesisError::Service(_)));
    assert!(!summary.is_empty());
}

#[tokio::test]
async fn extraction_failure_short_circuits_the_run() {
    struct BrokenDocument;

    impl PageReader for BrokenDocument {
        fn page_count(&self) -> Result<u32, ExtractionError> {
            Ok(1)
        }

        fn native_text(&self, _page_index: u32) -> Result<String, ExtractionError> {
            Err(ExtractionError::ExtractionFailed(
                "corrupt page stream".to_string(),
            ))
        }

        fn rasterize_page(
            &self,
            _page_index: u32,
            _output_dir: &Path,
        ) -> Result<PathBuf, ExtractionError> {
            unreachable!("native_text already failed")
        }
    }

    let summarizer = Arc::new(RecordingSummarizer::new());
    let pipeline = pipeline_with(summarizer.clone());

    let (tx, _rx) = mpsc::channel(100);
    let err = pipeline.run(Arc::new(BrokenDocument), 1000, tx).await;

    assert!(err.is_err());
    // No stage after the failure ran.
    assert_eq!(summarizer.calls.load(Ordering::Relaxed), 0);
}
