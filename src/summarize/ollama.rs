//! Ollama-backed summarization capability.
//!
//! Talks to a local Ollama instance over its generate API. Decoding is
//! greedy (temperature 0) so repeated runs over the same document
//! produce the same summary.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SummarizeError, Summarizer, SummarizerConfig};

/// Summarization client over the Ollama API.
pub struct OllamaSummarizer {
    config: SummarizerConfig,
    client: Client,
}

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaSummarizer {
    /// Create a new summarizer with the given configuration.
    pub fn new(config: SummarizerConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Check if the summarization service is reachable.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.endpoint);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Call the Ollama generate API with a prompt.
    async fn call_ollama(&self, prompt: &str, num_predict: u32) -> Result<String, SummarizeError> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                // Greedy decoding: the reducer relies on repeatable output.
                temperature: 0.0,
                num_predict,
            },
        };

        let url = format!("{}/api/generate", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SummarizeError::Api(format!("HTTP {}: {}", status, body)));
        }

        let ollama_resp: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;

        Ok(ollama_resp.response)
    }
}

#[async_trait::async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_words: usize,
        min_words: usize,
    ) -> Result<String, SummarizeError> {
        let prompt = self
            .config
            .get_prompt()
            .replace("{max_words}", &max_words.to_string())
            .replace("{min_words}", &min_words.to_string())
            .replace("{content}", text);

        // Token budget: roughly two tokens per word of headroom.
        let num_predict = (max_words * 2).min(u32::MAX as usize) as u32;

        debug!(max_words, min_words, "requesting summary");
        let response = self.call_ollama(&prompt, num_predict).await?;

        let summary = response.trim().to_string();
        if summary.is_empty() {
            return Err(SummarizeError::Parse("Empty summary response".to_string()));
        }

        Ok(summary)
    }
}
