//! Document text extraction.
//!
//! Page-by-page text extraction from PDF documents using pdftotext
//! (Poppler) for native text layers, with rasterize-and-OCR fallback
//! for scanned pages. Any per-page failure aborts the whole document
//! run; there is no partial-result mode.

mod document;
mod extractor;

use thiserror::Error;

pub use document::{PdfDocument, PageReader, DEFAULT_RASTER_DPI};
pub use extractor::{PageText, PageTextExtractor, PageTextMethod};

use crate::ocr::OcrError;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
