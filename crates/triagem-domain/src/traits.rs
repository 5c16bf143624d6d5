//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the classification pipeline and
//! infrastructure. Implementations live in other crates.

use std::future::Future;

/// Trait for text-completion backends (LLM providers)
///
/// Implemented by the infrastructure layer (triagem-llm). One adapter per
/// provider; the pipeline depends only on this trait.
pub trait TextCompletionBackend {
    /// Error type for backend calls
    type Error;

    /// Short provider name, used in logs
    fn name(&self) -> &str;

    /// Model identifier sent to the provider
    fn model(&self) -> &str;

    /// Generate a text completion for the prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Generate a completion constrained to JSON, when the provider supports it
    ///
    /// `schema` is a JSON schema describing the expected object. Providers
    /// without a structured mode fall back to plain generation.
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for turning a binary document into plain text
///
/// Implemented by the application layer (triagem-pipeline)
pub trait DocumentTextExtractor {
    /// Error type for extraction
    type Error;

    /// Extract the text of every page, concatenated in document order
    ///
    /// A document without any text layer yields an empty string, not an error.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error>;
}
