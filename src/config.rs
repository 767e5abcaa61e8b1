//! Configuration management.
//!
//! Settings come from a TOML file (`lector.toml` next to the working
//! directory or under the user config dir), with every field
//! defaulted and environment variables taking precedence over the
//! file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extract::DEFAULT_RASTER_DPI;
use crate::summarize::{
    SummarizerConfig, CHUNK_SUMMARY_MAX_WORDS, DEFAULT_MAX_PASSES, DEFAULT_MIN_WORDS,
    DEFAULT_TARGET_WORDS,
};
use crate::text::DEFAULT_CHUNK_WORDS;
use crate::tts::TtsConfig;

/// Config file name searched for in the working directory and the
/// user config dir.
pub const CONFIG_FILE_NAME: &str = "lector.toml";

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Rasterization resolution for OCR fallback, in DPI.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// OCR language (Tesseract language code).
    #[serde(default = "default_ocr_language")]
    pub language: String,
}

fn default_dpi() -> u32 {
    DEFAULT_RASTER_DPI
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            language: default_ocr_language(),
        }
    }
}

impl ExtractionConfig {
    /// Apply environment variable overrides (`LECTOR_RASTER_DPI`,
    /// `LECTOR_OCR_LANGUAGE`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LECTOR_RASTER_DPI") {
            if let Ok(n) = val.parse() {
                self.dpi = n;
            }
        }
        if let Ok(val) = std::env::var("LECTOR_OCR_LANGUAGE") {
            self.language = val;
        }
        self
    }
}

/// Pipeline shape settings: chunking, reduction, artifact storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum words per summarizer input chunk.
    #[serde(default = "default_chunk_words")]
    pub chunk_words: usize,
    /// Word ceiling for each chunk's summary.
    #[serde(default = "default_chunk_summary_words")]
    pub chunk_summary_words: usize,
    /// Default target word count for the final summary.
    #[serde(default = "default_target_length")]
    pub target_length: usize,
    /// Minimum word count handed to the summarizer.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Ceiling on convergence passes.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    /// Scratch directory for generated audio files.
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

fn default_chunk_words() -> usize {
    DEFAULT_CHUNK_WORDS
}

fn default_chunk_summary_words() -> usize {
    CHUNK_SUMMARY_MAX_WORDS
}

fn default_target_length() -> usize {
    DEFAULT_TARGET_WORDS
}

fn default_min_length() -> usize {
    DEFAULT_MIN_WORDS
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("audio_files")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_words: default_chunk_words(),
            chunk_summary_words: default_chunk_summary_words(),
            target_length: default_target_length(),
            min_length: default_min_length(),
            max_passes: default_max_passes(),
            audio_dir: default_audio_dir(),
        }
    }
}

impl PipelineConfig {
    /// Apply environment variable overrides (`LECTOR_TARGET_LENGTH`,
    /// `LECTOR_AUDIO_DIR`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LECTOR_TARGET_LENGTH") {
            if let Ok(n) = val.parse() {
                self.target_length = n;
            }
        }
        if let Ok(val) = std::env::var("LECTOR_AUDIO_DIR") {
            self.audio_dir = PathBuf::from(val);
        }
        self
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LectorConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl LectorConfig {
    /// Load configuration: explicit path, else auto-discovery, else
    /// defaults; env overrides are applied last in all cases.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("Cannot read config {}: {}", path.display(), e))?;
                toml::from_str(&raw)
                    .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?
            }
            None => match Self::discover() {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "loaded discovered config");
                    let raw = std::fs::read_to_string(&path)?;
                    toml::from_str(&raw).map_err(|e| {
                        anyhow::anyhow!("Invalid config {}: {}", path.display(), e)
                    })?
                }
                None => Self::default(),
            },
        };

        Ok(config.with_env_overrides())
    }

    /// Search the working directory and the user config dir for a
    /// config file.
    fn discover() -> Option<PathBuf> {
        let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        let user_config = dirs::config_dir()?.join("lector").join(CONFIG_FILE_NAME);
        user_config.exists().then_some(user_config)
    }

    /// Apply environment variable overrides to every section.
    pub fn with_env_overrides(mut self) -> Self {
        self.extraction = self.extraction.with_env_overrides();
        self.summarizer = self.summarizer.with_env_overrides();
        self.tts = self.tts.with_env_overrides();
        self.pipeline = self.pipeline.with_env_overrides();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: LectorConfig = toml::from_str("").unwrap();
        assert_eq!(config, LectorConfig::default());
        assert_eq!(config.pipeline.chunk_words, 512);
        assert_eq!(config.pipeline.target_length, 1000);
        assert_eq!(config.pipeline.min_length, 30);
        assert_eq!(config.extraction.dpi, 300);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: LectorConfig = toml::from_str(
            r#"
            [pipeline]
            target_length = 500

            [summarizer]
            model = "mistral:7b"
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline.target_length, 500);
        assert_eq!(config.pipeline.chunk_words, 512);
        assert_eq!(config.summarizer.model, "mistral:7b");
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = LectorConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: LectorConfig = toml::from_str(&raw).unwrap();
        assert_eq!(config, parsed);
    }
}
