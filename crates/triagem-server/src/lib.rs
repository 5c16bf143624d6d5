//! Triagem Server
//!
//! HTTP surface of the email triage service: serves the upload form and
//! classifies submitted emails through the configured LLM provider.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use triagem_domain::traits::TextCompletionBackend;
use triagem_llm::{LlmError, Provider};
use triagem_pipeline::Classifier;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The LLM provider could not be built
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the HTTP server
///
/// Reads the provider API key from the environment, builds the provider and
/// classifier, and serves until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Triagem");
    info!("Bind address: {}", config.bind_addr());
    info!("Provider: {} ({})", config.provider.as_str(), config.model_name());
    info!(
        "Backend timeout: {} seconds",
        config.classifier.backend_timeout_secs
    );

    let api_key = config.api_key_from_env().map_err(|e| {
        error!(error = %e, "Cannot start without an API key");
        e
    })?;
    let provider = Provider::from_settings(config.provider_settings(api_key))?;
    info!(
        "Using {} backend with model {}",
        provider.name(),
        provider.model()
    );

    let classifier = Classifier::new(provider, config.classifier.clone());
    let state = AppState::new(classifier, config.max_upload_bytes);
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Triagem listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let err = ServerError::from(config::ConfigError::MissingApiKey("GOOGLE_API_KEY"));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
