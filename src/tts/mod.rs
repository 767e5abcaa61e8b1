//! Text-to-speech capability boundary.
//!
//! Speech synthesis is a black-box capability: summary text in, audio
//! bytes out. The built-in implementation posts to an HTTP TTS service
//! that answers with MP3-compatible audio. A synthesis failure never
//! invalidates an already-computed summary; callers report it and keep
//! the text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from speech synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Nothing to synthesize: text is empty")]
    EmptyText,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Synthesis service error: {0}")]
    Service(String),

    #[error("Synthesis produced no audio")]
    EmptyAudio,
}

/// Trait for speech synthesis capabilities.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into audio bytes. Succeeds only with a
    /// non-empty byte stream.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;
}

/// Configuration for the HTTP TTS service client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsConfig {
    /// TTS service endpoint. Expected to accept a JSON body with
    /// `text` and `lang` fields and answer with audio bytes.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Language tag sent to the service.
    #[serde(default = "default_language")]
    pub language: String,
    /// Optional voice name, service-specific.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:5500/api/tts".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            language: default_language(),
            voice: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TtsConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LECTOR_TTS_ENDPOINT`: service endpoint
    /// - `LECTOR_TTS_LANGUAGE`: language tag
    /// - `LECTOR_TTS_VOICE`: voice name
    /// - `LECTOR_TTS_TIMEOUT`: per-request timeout in seconds
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LECTOR_TTS_ENDPOINT") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("LECTOR_TTS_LANGUAGE") {
            self.language = val;
        }
        if let Ok(val) = std::env::var("LECTOR_TTS_VOICE") {
            self.voice = Some(val);
        }
        if let Ok(val) = std::env::var("LECTOR_TTS_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.timeout_secs = n;
            }
        }
        self
    }
}

/// HTTP TTS service request body.
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
}

/// Speech synthesis over an HTTP TTS service.
pub struct HttpTtsService {
    config: TtsConfig,
    client: Client,
}

impl HttpTtsService {
    /// Create a new client with the given configuration.
    pub fn new(config: TtsConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &TtsConfig {
        &self.config
    }

    /// Check if the TTS service is reachable.
    pub async fn is_available(&self) -> bool {
        self.client
            .get(&self.config.endpoint)
            .send()
            .await
            .is_ok()
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpTtsService {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let request = TtsRequest {
            text,
            lang: &self.config.language,
            voice: self.config.voice.as_deref(),
        };

        debug!(chars = text.len(), "requesting speech synthesis");
        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| SynthesisError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SynthesisError::Service(format!("HTTP {}: {}", status, body)));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SynthesisError::Connection(e.to_string()))?;

        if bytes.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        Ok(bytes.to_vec())
    }
}
