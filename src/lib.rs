//! Lector - PDF to spoken-audio summarizer.
//!
//! Converts a PDF document into a bounded spoken-audio summary:
//! per-page text extraction with OCR fallback for scanned pages,
//! cleaning and word-bounded chunking, iterative multi-pass
//! summarization down to a target word count, and text-to-speech
//! synthesis of the result.

pub mod audio;
pub mod cli;
pub mod config;
pub mod extract;
pub mod ocr;
pub mod services;
pub mod summarize;
pub mod text;
pub mod tts;
pub mod utils;
