//! Summarizer client configuration.

use serde::{Deserialize, Serialize};

use super::prompts::DEFAULT_SUMMARY_PROMPT;

/// Configuration for the summarization capability client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// API endpoint of the Ollama instance.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model to use for summarization.
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout in seconds. Summarization models can run
    /// long on large inputs; the timeout bounds each capability call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Custom prompt (uses {max_words}, {min_words} and {content}
    /// placeholders).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            prompt: None,
        }
    }
}

impl SummarizerConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LECTOR_SUMMARIZER_ENDPOINT`: API endpoint
    /// - `LECTOR_SUMMARIZER_MODEL`: Model name
    /// - `LECTOR_SUMMARIZER_TIMEOUT`: Per-request timeout in seconds
    /// - `LECTOR_SUMMARIZER_PROMPT`: Custom prompt template
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LECTOR_SUMMARIZER_ENDPOINT") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("LECTOR_SUMMARIZER_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LECTOR_SUMMARIZER_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.timeout_secs = n;
            }
        }
        if let Ok(val) = std::env::var("LECTOR_SUMMARIZER_PROMPT") {
            self.prompt = Some(val);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Get the prompt template, custom or default.
    pub fn get_prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_SUMMARY_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SummarizerConfig::default();
        assert!(config.endpoint.contains("11434"));
        assert!(config.prompt.is_none());
        assert!(config.get_prompt().contains("{content}"));
        assert!(config.get_prompt().contains("{max_words}"));
    }
}
