//! Tesseract OCR engine implementation.
//!
//! Uses Tesseract via command-line for text recognition. Traditional,
//! widely available, CPU-based.

use std::path::Path;
use std::process::Command;

use super::backend::{OcrEngine, OcrError};
use crate::utils::{check_binary, is_not_found};

/// Tesseract command-line OCR engine.
pub struct TesseractEngine {
    /// Tesseract language setting (e.g. "eng").
    language: String,
}

impl TesseractEngine {
    /// Create a new engine with the default (English) language.
    pub fn new() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }

    /// Set the Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }

    /// Run Tesseract on an image file, returning raw stdout.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::OcrFailed(format!("tesseract failed: {}", stderr)))
                }
            }
            Err(e) if is_not_found(&e) => Err(OcrError::EngineNotAvailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("tesseract") {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn recognize(&self, image_path: &Path) -> Result<Vec<String>, OcrError> {
        let raw = self.run_tesseract(image_path)?;

        // Tesseract emits one detected line per output line; keep them
        // as the engine's fragments, in engine order.
        Ok(raw
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect())
    }
}
