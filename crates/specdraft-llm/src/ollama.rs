//! Ollama provider implementation
//!
//! Wraps a single call to Ollama's generate API. The model, sampling
//! temperature, and maximum output length are fixed per provider instance;
//! low temperature favors schema compliance over creativity.

use crate::CompletionError;
use serde::{Deserialize, Serialize};
use specdraft_domain::traits::CompletionProvider;
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default sampling temperature (near-deterministic)
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default output-length bound, sufficient for the full structured schema
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Default request timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Completion-service parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Model identifier (e.g. "mistral")
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum output length in tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl CompletionConfig {
    /// Configuration for the given model with default sampling bounds
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Ollama API provider.
///
/// Performs exactly one attempt per invocation; any underlying timeout or
/// connectivity failure is propagated as a typed `CompletionError`.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    config: CompletionConfig,
    client: reqwest::Client,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

/// Sampling options forwarded to the model
#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a provider for the given endpoint and configuration
    ///
    /// # Errors
    ///
    /// Returns `Unknown` if the underlying HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        config: CompletionConfig,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CompletionError::Unknown(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            config,
            client,
        })
    }

    /// Create a provider against the default local endpoint
    pub fn default_endpoint(config: CompletionConfig) -> Result<Self, CompletionError> {
        Self::new(DEFAULT_ENDPOINT, config)
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send the prompt and return the raw text output.
    ///
    /// # Errors
    ///
    /// - `Unreachable` when the service cannot be contacted
    /// - `Timeout` when the configured request timeout elapses
    /// - `Refused` when the service rejects the request (e.g. unknown model)
    /// - `Unknown` for anything else, including an unparseable response body
    pub async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_output_tokens,
            },
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "sending completion request");

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else if e.is_connect() {
                    CompletionError::Unreachable(e.to_string())
                } else {
                    CompletionError::Unknown(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_client_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            return Err(CompletionError::Refused(format!("HTTP {}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            return Err(CompletionError::Unknown(format!("HTTP {}: {}", status, body)));
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Unknown(format!("failed to parse response: {}", e)))?;

        debug!(response_len = parsed.response.len(), "completion response received");

        Ok(parsed.response)
    }
}

impl CompletionProvider for OllamaProvider {
    type Error = CompletionError;

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.generate(prompt).await
    }
}
