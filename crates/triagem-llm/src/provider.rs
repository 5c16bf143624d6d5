//! Runtime provider selection
//!
//! The server picks one backend at startup from configuration. [`Provider`]
//! wraps the concrete adapters so the rest of the pipeline stays generic over
//! a single type.

use crate::{gemini, openai, GeminiProvider, LlmError, OpenAiProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use triagem_domain::traits::TextCompletionBackend;

/// Which provider to talk to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini
    #[default]
    #[serde(alias = "google")]
    Gemini,
    /// OpenAI chat completions
    OpenAi,
}

impl ProviderKind {
    /// Get the provider name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GOOGLE_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_MODEL,
            ProviderKind::OpenAi => openai::DEFAULT_MODEL,
        }
    }
}

/// Everything needed to build a [`Provider`]
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Provider to use
    pub kind: ProviderKind,
    /// API key (read from the environment at startup)
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Endpoint override; `None` uses the provider's public API
    pub endpoint: Option<String>,
    /// Sampling temperature; `None` uses the provider default
    pub temperature: Option<f32>,
    /// System instruction sent with every request
    pub system_instruction: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

/// A configured backend, selected at runtime
pub enum Provider {
    /// Google Gemini
    Gemini(GeminiProvider),
    /// OpenAI chat completions
    OpenAi(OpenAiProvider),
}

impl Provider {
    /// Build the provider described by `settings`
    pub fn from_settings(settings: ProviderSettings) -> Result<Self, LlmError> {
        match settings.kind {
            ProviderKind::Gemini => {
                let mut provider = GeminiProvider::new(settings.api_key, settings.model)?
                    .with_timeout(settings.timeout)?;
                if let Some(endpoint) = settings.endpoint {
                    provider = provider.with_endpoint(endpoint);
                }
                if let Some(temperature) = settings.temperature {
                    provider = provider.with_temperature(temperature);
                }
                if let Some(instruction) = settings.system_instruction {
                    provider = provider.with_system_instruction(instruction);
                }
                Ok(Provider::Gemini(provider))
            }
            ProviderKind::OpenAi => {
                let mut provider = OpenAiProvider::new(settings.api_key, settings.model)?
                    .with_timeout(settings.timeout)?;
                if let Some(endpoint) = settings.endpoint {
                    provider = provider.with_endpoint(endpoint);
                }
                if let Some(temperature) = settings.temperature {
                    provider = provider.with_temperature(temperature);
                }
                if let Some(instruction) = settings.system_instruction {
                    provider = provider.with_system_instruction(instruction);
                }
                Ok(Provider::OpenAi(provider))
            }
        }
    }

    /// Which provider this is
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Gemini(_) => ProviderKind::Gemini,
            Provider::OpenAi(_) => ProviderKind::OpenAi,
        }
    }
}

impl TextCompletionBackend for Provider {
    type Error = LlmError;

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    fn model(&self) -> &str {
        match self {
            Provider::Gemini(p) => p.model(),
            Provider::OpenAi(p) => p.model(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Gemini(p) => p.generate(prompt).await,
            Provider::OpenAi(p) => p.generate(prompt).await,
        }
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Gemini(p) => p.generate_structured(prompt, schema).await,
            Provider::OpenAi(p) => p.generate_structured(prompt, schema).await,
        }
    }
}
