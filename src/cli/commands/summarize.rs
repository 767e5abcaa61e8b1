//! `lector summarize` - the full pipeline: extract, reduce, speak.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::audio::{AudioStore, DOWNLOAD_FILENAME};
use crate::config::LectorConfig;
use crate::extract::{PageReader, PageTextMethod, PdfDocument};
use crate::ocr::TesseractEngine;
use crate::services::{Pipeline, PipelineEvent};
use crate::summarize::OllamaSummarizer;
use crate::tts::{HttpTtsService, SpeechSynthesizer};

/// Practical target length range offered to users; the core only
/// requires target > min_length, so values outside it get a warning,
/// not an error.
const TARGET_RANGE: std::ops::RangeInclusive<usize> = 100..=2000;

pub async fn cmd_summarize(
    config: &LectorConfig,
    pdf: &Path,
    length: Option<usize>,
    out: Option<&Path>,
    audio: bool,
    audio_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    if !pdf.exists() {
        anyhow::bail!("File not found: {}", pdf.display());
    }

    let target_length = length.unwrap_or(config.pipeline.target_length);
    if !TARGET_RANGE.contains(&target_length) {
        println!(
            "{} Target length {} is outside the usual {}-{} word range",
            style("!").yellow(),
            target_length,
            TARGET_RANGE.start(),
            TARGET_RANGE.end(),
        );
    }

    // Capability services are constructed once and shared by reference.
    let ocr = Arc::new(TesseractEngine::new().with_language(&config.extraction.language));
    let summarizer = Arc::new(OllamaSummarizer::new(config.summarizer.clone()));
    let pipeline = Pipeline::new(ocr, summarizer, config.pipeline.clone());

    let document = PdfDocument::open(pdf)?.with_dpi(config.extraction.dpi);
    let reader: Arc<dyn PageReader> = Arc::new(document);

    let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>(100);
    let event_handler = tokio::spawn(render_events(event_rx));

    let result = pipeline.run(reader, target_length, event_tx).await;
    let _ = event_handler.await;
    let summary = result?;

    println!("\n{}", style("Summary").cyan().bold());
    println!("{}\n", summary);

    if let Some(out_path) = out {
        std::fs::write(out_path, &summary)?;
        println!(
            "{} Summary saved to {}",
            style("✓").green(),
            out_path.display()
        );
    }

    if audio || audio_out.is_some() {
        synthesize_summary(config, &summary, audio_out.as_deref()).await;
    }

    Ok(())
}

/// Speak the summary and store the artifact. Synthesis failure is
/// reported but never invalidates the already-computed summary, so
/// this returns nothing.
async fn synthesize_summary(config: &LectorConfig, summary: &str, audio_out: Option<&Path>) {
    let tts = HttpTtsService::new(config.tts.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Synthesizing speech...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let synthesis = tts.synthesize(summary).await;
    spinner.finish_and_clear();

    let bytes = match synthesis {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!(
                "{} Speech synthesis failed: {} (the summary text above is unaffected)",
                style("✗").red(),
                e
            );
            return;
        }
    };

    let store = AudioStore::new(&config.pipeline.audio_dir);
    let artifact = match store.store(&bytes) {
        Ok(artifact) => artifact,
        Err(e) => {
            eprintln!("{} Could not store audio artifact: {}", style("✗").red(), e);
            return;
        }
    };

    println!(
        "{} Audio generated: {} ({}, {} bytes)",
        style("✓").green(),
        artifact.path.display(),
        artifact.media_type,
        artifact.len
    );

    if let Some(out_path) = audio_out {
        match std::fs::copy(&artifact.path, out_path) {
            Ok(_) => println!(
                "{} Audio saved to {}",
                style("✓").green(),
                out_path.display()
            ),
            Err(e) => eprintln!(
                "{} Could not copy audio to {}: {}",
                style("✗").red(),
                out_path.display(),
                e
            ),
        }
    } else {
        println!(
            "  {} download as {}",
            style("→").dim(),
            DOWNLOAD_FILENAME
        );
    }
}

/// Render pipeline events as progress output.
async fn render_events(mut event_rx: mpsc::Receiver<PipelineEvent>) {
    let mut pb: Option<ProgressBar> = None;
    let mut ocr_pages = 0usize;

    while let Some(event) = event_rx.recv().await {
        match event {
            PipelineEvent::ExtractionStarted { pages } => {
                println!(
                    "{} Extracting text from {} pages",
                    style("→").cyan(),
                    pages
                );
                let progress = ProgressBar::new(pages as u64);
                progress.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                        .unwrap()
                        .progress_chars("█▓░"),
                );
                progress.set_message("Extracting text...");
                pb = Some(progress);
            }
            PipelineEvent::PageExtracted {
                page_index, method, ..
            } => {
                if method == PageTextMethod::Ocr {
                    ocr_pages += 1;
                    if let Some(ref progress) = pb {
                        progress.set_message(format!("OCR fallback on page {}", page_index + 1));
                    }
                }
                if let Some(ref progress) = pb {
                    progress.inc(1);
                }
            }
            PipelineEvent::ExtractionComplete { words } => {
                if let Some(progress) = pb.take() {
                    progress.finish_and_clear();
                }
                println!(
                    "{} Extracted {} words ({} pages via OCR)",
                    style("✓").green(),
                    words,
                    ocr_pages
                );
            }
            PipelineEvent::SummarizationStarted { chunks } => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_message(format!("Summarizing ({} chunks)...", chunks));
                spinner.enable_steady_tick(std::time::Duration::from_millis(100));
                pb = Some(spinner);
            }
            PipelineEvent::SummarizationComplete { words } => {
                if let Some(progress) = pb.take() {
                    progress.finish_and_clear();
                }
                println!("{} Summary ready: {} words", style("✓").green(), words);
            }
        }
    }
}
