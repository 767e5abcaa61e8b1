//! `lector check` - external tool and capability availability report.

use console::style;

use crate::config::LectorConfig;
use crate::ocr::{OcrEngine, TesseractEngine};
use crate::summarize::OllamaSummarizer;
use crate::tts::HttpTtsService;
use crate::utils::check_binary;

pub async fn cmd_check(config: &LectorConfig) -> anyhow::Result<()> {
    println!("{}", style("External tools:").cyan());

    let mut all_found = true;
    for tool in ["pdftotext", "pdftoppm", "pdfinfo", "tesseract"] {
        if check_binary(tool) {
            println!("  {} {}", style("✓").green(), tool);
        } else {
            println!("  {} {} (missing)", style("✗").red(), tool);
            all_found = false;
        }
    }

    let tesseract = TesseractEngine::new().with_language(&config.extraction.language);
    println!("\n{}", style("OCR engine:").cyan());
    println!("  {} {}", style("→").dim(), tesseract.availability_hint());

    println!("\n{}", style("Summarization service:").cyan());
    let summarizer = OllamaSummarizer::new(config.summarizer.clone());
    if summarizer.is_available().await {
        println!(
            "  {} {} reachable (model: {})",
            style("✓").green(),
            config.summarizer.endpoint,
            config.summarizer.model
        );
    } else {
        println!(
            "  {} {} not reachable - is Ollama running?",
            style("✗").red(),
            config.summarizer.endpoint
        );
    }

    println!("\n{}", style("TTS service:").cyan());
    let tts = HttpTtsService::new(config.tts.clone());
    if tts.is_available().await {
        println!(
            "  {} {} reachable (language: {})",
            style("✓").green(),
            config.tts.endpoint,
            config.tts.language
        );
    } else {
        println!(
            "  {} {} not reachable",
            style("✗").red(),
            config.tts.endpoint
        );
    }

    println!();
    if all_found {
        println!("{} Extraction tools are available", style("✓").green());
    } else {
        println!(
            "{} Some tools are missing. Install them for full support:",
            style("!").yellow()
        );
        println!("  - pdftotext, pdftoppm, pdfinfo: poppler-utils package");
        println!("  - tesseract: tesseract-ocr package");
    }

    Ok(())
}
