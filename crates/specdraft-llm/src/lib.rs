//! SpecDraft Completion Client
//!
//! Implementations of the `CompletionProvider` trait from `specdraft-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing (canned responses,
//!   injectable failures and latency)
//! - `OllamaProvider`: local Ollama API integration
//!
//! Each provider performs exactly one request per invocation; there is no
//! retry at this layer.
//!
//! # Examples
//!
//! ```
//! use specdraft_llm::MockProvider;
//! use specdraft_domain::traits::CompletionProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new(r#"{"modules": []}"#);
//! let raw = provider.complete("any prompt").await.unwrap();
//! assert_eq!(raw, r#"{"modules": []}"#);
//! # });
//! ```

#![warn(missing_docs)]

pub mod ollama;

use specdraft_domain::traits::CompletionProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use ollama::{CompletionConfig, OllamaProvider, DEFAULT_ENDPOINT};

/// Errors that can occur during a completion round trip
#[derive(Error, Debug, Clone)]
pub enum CompletionError {
    /// The completion service could not be reached
    #[error("completion service unreachable: {0}")]
    Unreachable(String),

    /// The request exceeded the configured timeout
    #[error("completion request timed out")]
    Timeout,

    /// The service rejected the request (not transient)
    #[error("completion request refused: {0}")]
    Refused(String),

    /// Any other failure
    #[error("completion failed: {0}")]
    Unknown(String),
}

/// Deterministic completion provider for testing.
///
/// Returns canned responses without any network call. Specific prompts can
/// be mapped to responses or errors, and an artificial latency can be
/// injected to exercise timeout handling.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, CompletionError>>>>,
    delay: Option<Duration>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a provider returning a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            delay: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Map a specific prompt to a response
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), Ok(response.into()));
    }

    /// Map a specific prompt to a failure
    pub fn add_failure(&mut self, prompt: impl Into<String>, error: CompletionError) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), Err(error));
    }

    /// Sleep for the given duration before answering any prompt
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of completed `complete` calls
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl CompletionProvider for MockProvider {
    type Error = CompletionError;

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        *self.call_count.lock().unwrap() += 1;

        let canned = self.responses.lock().unwrap().get(prompt).cloned();
        match canned {
            Some(result) => result,
            None => Ok(self.default_response.clone()),
        }
    }
}
