//! Per-page text extraction with OCR fallback.

use std::sync::Arc;

use tempfile::TempDir;

use super::{ExtractionError, PageReader};
use crate::ocr::OcrEngine;

/// How a page's text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTextMethod {
    /// Native text layer embedded in the PDF.
    NativeLayer,
    /// Rasterized and recognized by the OCR engine.
    Ocr,
}

/// Text of one page plus the method that produced it.
#[derive(Debug)]
pub struct PageText {
    pub text: String,
    pub method: PageTextMethod,
}

/// Extracts the text of a single document page.
///
/// Prefers the native text layer; when the trimmed layer is empty the
/// page is rasterized and handed to the OCR engine, whose fragments
/// are joined with single spaces in engine-return order.
pub struct PageTextExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl PageTextExtractor {
    /// Create an extractor over a shared OCR engine.
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Extract one page's text, reporting which method produced it.
    pub fn extract_page(
        &self,
        reader: &dyn PageReader,
        page_index: u32,
    ) -> Result<PageText, ExtractionError> {
        let native = reader.native_text(page_index)?;
        if !native.trim().is_empty() {
            return Ok(PageText {
                text: native,
                method: PageTextMethod::NativeLayer,
            });
        }

        tracing::debug!(page = page_index, "no native text layer, running OCR");

        // Rasterize exactly this one page into a scratch dir that is
        // dropped as soon as recognition finishes.
        let scratch = TempDir::new()?;
        let image = reader.rasterize_page(page_index, scratch.path())?;
        let fragments = self.ocr.recognize(&image)?;

        Ok(PageText {
            text: fragments.join(" "),
            method: PageTextMethod::Ocr,
        })
    }

    /// Extract one page's text.
    pub fn extract(
        &self,
        reader: &dyn PageReader,
        page_index: u32,
    ) -> Result<String, ExtractionError> {
        self.extract_page(reader, page_index).map(|p| p.text)
    }
}
