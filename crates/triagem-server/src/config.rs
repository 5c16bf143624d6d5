//! Configuration file parsing for the server.
//!
//! Loads settings from an optional TOML file: bind address, provider and
//! model selection, sampling options, upload limit and classifier settings.
//! The provider API key is never stored in the file; it is read from the
//! environment once at startup.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use triagem_llm::{ProviderKind, ProviderSettings};
use triagem_pipeline::{ClassifierConfig, SYSTEM_INSTRUCTION};

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// API key environment variable not set
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),

    /// Invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 5000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// LLM provider ("gemini" or "openai")
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model identifier; defaults to the provider's default model
    #[serde(default)]
    pub model: Option<String>,

    /// Provider endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Sampling temperature; provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Send the email-triage system instruction with every request
    #[serde(default)]
    pub use_system_instruction: bool,

    /// Maximum request body size in bytes (default: 10 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Classification pipeline settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            provider: ProviderKind::default(),
            model: None,
            endpoint: None,
            temperature: None,
            use_system_instruction: false,
            max_upload_bytes: default_max_upload_bytes(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate().map_err(ConfigError::Invalid)?;
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::Invalid(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    temperature
                )));
            }
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Model to use, falling back to the provider default
    pub fn model_name(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    /// Read the provider API key from the environment
    pub fn api_key_from_env(&self) -> Result<String, ConfigError> {
        let var = self.provider.api_key_env();
        std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(var))
    }

    /// Settings for building the configured provider
    pub fn provider_settings(&self, api_key: String) -> ProviderSettings {
        ProviderSettings {
            kind: self.provider,
            api_key,
            model: self.model_name(),
            endpoint: self.endpoint.clone(),
            temperature: self.temperature,
            system_instruction: self
                .use_system_instruction
                .then(|| SYSTEM_INSTRUCTION.to_string()),
            timeout: Duration::from_secs(self.classifier.backend_timeout_secs),
        }
    }
}
