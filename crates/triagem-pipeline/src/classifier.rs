//! Core Classifier implementation

use crate::config::ClassifierConfig;
use crate::error::PipelineError;
use crate::parser::{parse_classification, ParsedClassification};
use crate::pdf::PdfTextExtractor;
use crate::prompt::{PromptBuilder, RESPONSE_SCHEMA};
use crate::resolver::{resolve_text_source, ResolvedSource, TextOrigin};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use triagem_domain::traits::{DocumentTextExtractor, TextCompletionBackend};
use triagem_domain::{ClassificationResult, EmailSubmission, EmailText};

/// Stages a request moves through; any failure jumps straight to the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Submission received
    AwaitingInput,
    /// Picking the authoritative text source
    Resolving,
    /// Reading the text layer of an uploaded PDF
    Extracting,
    /// Rendering the prompt
    BuildingPrompt,
    /// Waiting on the backend
    CallingBackend,
    /// Result validated, ready to return
    Responding,
}

impl Stage {
    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AwaitingInput => "awaiting_input",
            Stage::Resolving => "resolving",
            Stage::Extracting => "extracting",
            Stage::BuildingPrompt => "building_prompt",
            Stage::CallingBackend => "calling_backend",
            Stage::Responding => "responding",
        }
    }
}

/// Result of a successful classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationOutcome {
    /// Typed result
    pub result: ClassificationResult,

    /// Validated JSON text, returned verbatim to the caller
    pub json: String,

    /// Where the email text came from
    pub origin: TextOrigin,

    /// Time spent in the backend call (milliseconds)
    pub backend_time_ms: u64,
}

/// The Classifier turns an email submission into a validated classification
pub struct Classifier<B, X = PdfTextExtractor> {
    backend: Arc<B>,
    extractor: Arc<X>,
    config: ClassifierConfig,
}

impl<B> Classifier<B, PdfTextExtractor> {
    /// Create a new Classifier using the built-in PDF extractor
    pub fn new(backend: B, config: ClassifierConfig) -> Self {
        Self::with_extractor(backend, PdfTextExtractor::new(), config)
    }
}

impl<B, X> Classifier<B, X> {
    /// Create a new Classifier with a custom document extractor
    pub fn with_extractor(backend: B, extractor: X, config: ClassifierConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            extractor: Arc::new(extractor),
            config,
        }
    }

    /// The configured backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

impl<B, X> Classifier<B, X>
where
    B: TextCompletionBackend + Send + Sync + 'static,
    B::Error: Display,
    X: DocumentTextExtractor + Send + Sync + 'static,
    X::Error: Display,
{
    /// Classify one submission
    ///
    /// Runs resolve → (extract) → prompt → backend → validate, stopping at the
    /// first failure. Nothing is retried.
    pub async fn classify(
        &self,
        submission: EmailSubmission,
    ) -> Result<ClassificationOutcome, PipelineError> {
        debug!(stage = Stage::AwaitingInput.as_str(), "Submission received");

        debug!(stage = Stage::Resolving.as_str(), "Resolving text source");
        let (text, origin) = match resolve_text_source(submission)? {
            ResolvedSource::Text { text, origin } => (text, origin),
            ResolvedSource::Pdf(bytes) => {
                debug!(stage = Stage::Extracting.as_str(), bytes = bytes.len(), "Extracting PDF text");
                (self.extract_pdf(bytes).await?, TextOrigin::Pdf)
            }
        };

        // Extraction may legitimately produce nothing (image-only PDFs)
        let text = EmailText::new(text).ok_or_else(|| {
            warn!(origin = origin.as_str(), "Resolved email text is blank");
            PipelineError::no_content()
        })?;

        info!(
            origin = origin.as_str(),
            chars = text.char_count(),
            "Classifying email"
        );

        let (parsed, backend_time_ms) = self.classify_text(&text).await?;

        debug!(stage = Stage::Responding.as_str(), "Classification validated");
        info!(
            classification = %parsed.result.classification,
            requires_action = parsed.result.requires_action(),
            backend_time_ms,
            "Classification complete"
        );

        Ok(ClassificationOutcome {
            result: parsed.result,
            json: parsed.json,
            origin,
            backend_time_ms,
        })
    }

    /// Prompt the backend with resolved text and validate its answer
    async fn classify_text(
        &self,
        text: &EmailText,
    ) -> Result<(ParsedClassification, u64), PipelineError> {
        debug!(stage = Stage::BuildingPrompt.as_str(), "Building prompt");
        let prompt = PromptBuilder::new(text).build();
        debug!("Prompt length: {} chars", prompt.len());

        debug!(
            stage = Stage::CallingBackend.as_str(),
            backend = self.backend.name(),
            model = self.backend.model(),
            "Calling backend"
        );
        let started = Instant::now();
        let reply = timeout(self.config.backend_timeout(), self.call_backend(&prompt))
            .await
            .map_err(|_| {
                warn!(
                    backend = self.backend.name(),
                    timeout_secs = self.config.backend_timeout_secs,
                    "Backend call timed out"
                );
                PipelineError::backend_failed()
            })??;
        let backend_time_ms = started.elapsed().as_millis() as u64;

        debug!("Backend response length: {} chars", reply.len());

        let parsed = parse_classification(&reply)?;
        Ok((parsed, backend_time_ms))
    }

    async fn call_backend(&self, prompt: &str) -> Result<String, PipelineError> {
        let reply = if self.config.structured_output {
            self.backend.generate_structured(prompt, RESPONSE_SCHEMA).await
        } else {
            self.backend.generate(prompt).await
        };

        reply.map_err(|e| {
            warn!(backend = self.backend.name(), error = %e, "Backend call failed");
            PipelineError::backend_failed()
        })
    }

    /// Run the (blocking) PDF parser off the async executor
    async fn extract_pdf(&self, bytes: Vec<u8>) -> Result<String, PipelineError> {
        let extractor = Arc::clone(&self.extractor);
        let joined = tokio::task::spawn_blocking(move || {
            extractor
                .extract_text(&bytes)
                .map_err(|e| e.to_string())
        })
        .await;

        match joined {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(reason)) => {
                warn!(error = %reason, "PDF extraction failed");
                Err(PipelineError::unreadable_pdf())
            }
            Err(e) => {
                warn!(error = %e, "PDF extraction task aborted");
                Err(PipelineError::unreadable_pdf())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triagem_llm::MockProvider;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::AwaitingInput.as_str(), "awaiting_input");
        assert_eq!(Stage::CallingBackend.as_str(), "calling_backend");
    }

    #[test]
    fn test_classifier_exposes_config() {
        let config = ClassifierConfig {
            backend_timeout_secs: 5,
            structured_output: false,
        };
        let classifier = Classifier::new(MockProvider::default(), config.clone());
        assert_eq!(classifier.config(), &config);
        assert_eq!(classifier.backend().call_count(), 0);
    }
}
