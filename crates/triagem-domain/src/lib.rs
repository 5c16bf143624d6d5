//! Triagem Domain Layer
//!
//! This crate contains the core domain model for Triagem, the email triage
//! service. It has ZERO external dependencies and defines the values that flow
//! through one classification request plus the trait interfaces that the
//! infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **EmailSubmission**: The raw inputs of one request (pasted text, uploaded file)
//! - **EmailText**: Resolved email content, guaranteed non-blank
//! - **Classification**: Productive ("Produtivo") or Unproductive ("Improdutivo")
//! - **ClassificationResult**: The label plus a suggested reply
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure domain logic only
//! - Backends (LLM providers, document parsers) live in other crates
//!   behind the traits in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod email_text;
pub mod submission;
pub mod traits;

// Re-exports for convenience
pub use classification::{Classification, ClassificationResult};
pub use email_text::EmailText;
pub use submission::{EmailSubmission, FileKind, UploadedFile};
