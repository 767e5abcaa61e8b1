//! OCR engine abstraction.

use std::path::Path;

use thiserror::Error;

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for OCR engines.
///
/// Engines are expensive to probe/initialize and stateless for
/// recognition, so one instance is constructed at startup and shared
/// by reference across the pipeline.
pub trait OcrEngine: Send + Sync {
    /// Check if this engine is usable (dependencies installed).
    fn is_available(&self) -> bool;

    /// Describe what is needed to make this engine available.
    fn availability_hint(&self) -> String;

    /// Recognize text in an image file.
    ///
    /// Returns detected text fragments in the order the engine emits
    /// them. Callers join fragments with single spaces; no re-sorting
    /// by position is performed, so reading order for multi-column
    /// layouts follows the engine, not the page geometry.
    fn recognize(&self, image_path: &Path) -> Result<Vec<String>, OcrError>;
}
