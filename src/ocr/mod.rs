//! OCR capability boundary.
//!
//! The pipeline treats OCR as a black-box capability: give it a
//! rasterized page image, get back detected text fragments. Tesseract
//! via the command line is the default and only built-in engine;
//! the `OcrEngine` trait keeps the seam open for others (and for
//! test fakes).

mod backend;
mod tesseract;

pub use backend::{OcrEngine, OcrError};
pub use tesseract::TesseractEngine;
