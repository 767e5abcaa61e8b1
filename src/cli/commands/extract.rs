//! `lector extract` - extraction and cleaning only, no summarization.

use std::path::Path;
use std::sync::Arc;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::LectorConfig;
use crate::extract::{ExtractionError, PageReader, PageTextExtractor, PdfDocument};
use crate::ocr::TesseractEngine;
use crate::text::clean_joined;

pub async fn cmd_extract(
    config: &LectorConfig,
    pdf: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    if !pdf.exists() {
        anyhow::bail!("File not found: {}", pdf.display());
    }

    let ocr = Arc::new(TesseractEngine::new().with_language(&config.extraction.language));
    let document = PdfDocument::open(pdf)?.with_dpi(config.extraction.dpi);
    let reader: Arc<dyn PageReader> = Arc::new(document);

    let page_count = {
        let reader = reader.clone();
        tokio::task::spawn_blocking(move || reader.page_count()).await??
    };

    println!(
        "{} Extracting text from {} pages",
        style("→").cyan(),
        page_count
    );
    let progress = ProgressBar::new(page_count as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let raw = {
        let reader = reader.clone();
        let progress = progress.clone();
        tokio::task::spawn_blocking(move || -> Result<String, ExtractionError> {
            let extractor = PageTextExtractor::new(ocr);
            let mut raw = String::new();
            for page_index in 0..page_count {
                raw.push_str(&extractor.extract(reader.as_ref(), page_index)?);
                progress.inc(1);
            }
            Ok(raw)
        })
        .await??
    };
    progress.finish_and_clear();

    let cleaned = clean_joined(&raw);
    println!(
        "{} Extracted {} words",
        style("✓").green(),
        cleaned.split_whitespace().count()
    );

    match out {
        Some(out_path) => {
            std::fs::write(out_path, &cleaned)?;
            println!(
                "{} Text saved to {}",
                style("✓").green(),
                out_path.display()
            );
        }
        None => println!("\n{}", cleaned),
    }

    Ok(())
}
