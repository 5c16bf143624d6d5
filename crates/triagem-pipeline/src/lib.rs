//! Triagem Pipeline
//!
//! Turns an email submission into a validated "Produtivo"/"Improdutivo"
//! classification with a suggested reply.
//!
//! # Architecture
//!
//! ```text
//! Submission → Resolver → (PDF Extractor) → PromptBuilder → Backend → Parser
//! ```
//!
//! - **Resolver**: picks pasted text over an uploaded `.txt`/`.pdf` file
//! - **PDF Extractor**: concatenates the text layer of every page
//! - **PromptBuilder**: fixed instructions with the email embedded verbatim
//! - **Parser**: strips code fences and enforces the two-key JSON contract
//!
//! Every failure becomes one of the four [`PipelineError`] kinds.
//!
//! # Example Usage
//!
//! ```no_run
//! use triagem_domain::EmailSubmission;
//! use triagem_llm::MockProvider;
//! use triagem_pipeline::{Classifier, ClassifierConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = MockProvider::new(r#"{"classificacao":"Produtivo","sugestao_resposta":"Já verificamos."}"#);
//! let classifier = Classifier::new(backend, ClassifierConfig::default());
//!
//! let outcome = classifier
//!     .classify(EmailSubmission::from_text("Please send the invoice status"))
//!     .await?;
//!
//! println!("{}", outcome.json);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod pdf;
mod prompt;
mod resolver;


pub use classifier::{ClassificationOutcome, Classifier, Stage};
pub use config::ClassifierConfig;
pub use error::{
    PipelineError, MSG_BACKEND_FAILED, MSG_INVALID_ENCODING, MSG_MALFORMED_RESPONSE,
    MSG_NO_CONTENT, MSG_NO_VALID_INPUT, MSG_UNREADABLE_PDF, MSG_UNSUPPORTED_FILE,
};
pub use parser::{parse_classification, ParsedClassification};
pub use pdf::{PdfError, PdfTextExtractor};
pub use prompt::{PromptBuilder, RESPONSE_SCHEMA, SYSTEM_INSTRUCTION};
pub use resolver::{resolve_text_source, ResolvedSource, TextOrigin};
