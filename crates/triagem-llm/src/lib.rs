//! Triagem LLM Provider Layer
//!
//! Pluggable text-completion backends for email classification.
//!
//! # Architecture
//!
//! This crate provides implementations of the `TextCompletionBackend` trait
//! from `triagem-domain`. Every provider makes a single attempt per call with
//! an explicit timeout and no retries.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Generative Language API (`generateContent`)
//! - `OpenAiProvider`: OpenAI Chat Completions API
//! - `Provider`: Runtime selection between Gemini and OpenAI
//!
//! # Examples
//!
//! ```
//! use triagem_llm::MockProvider;
//! use triagem_domain::traits::TextCompletionBackend;
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"classificacao":"Produtivo","sugestao_resposta":"Ok"}"#);
//! let result = provider.generate("test prompt").await.unwrap();
//! assert!(result.contains("Produtivo"));
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod openai;
pub mod provider;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use triagem_domain::traits::TextCompletionBackend;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::{Provider, ProviderKind, ProviderSettings};

/// Default timeout for a single LLM request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// API key rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Quota or rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

/// Map a non-success HTTP status to an error
pub(crate) fn status_error(status: reqwest::StatusCode, model: &str, body: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::Authentication(format!("HTTP {}: {}", status, body)),
        404 => LlmError::ModelNotAvailable(model.to_string()),
        429 => LlmError::RateLimited(format!("HTTP {}: {}", status, body)),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

/// Build the shared HTTP client with the given timeout
pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use triagem_llm::MockProvider;
/// use triagem_domain::traits::TextCompletionBackend;
///
/// # async fn example() {
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("prompt1").await.unwrap(), "response1");
/// assert_eq!(provider.call_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Option<String>,
    responses: Arc<Mutex<HashMap<String, Option<String>>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
    last_schema: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            last_schema: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a MockProvider whose every call fails with a communication error
    pub fn failing() -> Self {
        Self {
            default_response: None,
            ..Self::new("")
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), Some(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses.lock().unwrap().insert(prompt.into(), None);
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// The prompt of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    /// The schema of the most recent call; `None` after a plain `generate`
    pub fn last_schema(&self) -> Option<String> {
        self.last_schema.lock().unwrap().clone()
    }

    fn respond(&self, prompt: &str, schema: Option<&str>) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        *self.last_schema.lock().unwrap() = schema.map(str::to_string);

        let configured = self.responses.lock().unwrap().get(prompt).cloned();
        match configured.unwrap_or_else(|| self.default_response.clone()) {
            Some(response) => Ok(response),
            None => Err(LlmError::Communication("Mock network failure".to_string())),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextCompletionBackend for MockProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt, None)
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        // Canned responses are returned as-is; only the schema is recorded
        self.respond(prompt, Some(schema))
    }
}
