//! PDF text extraction backed by the `pdf-extract` crate

use std::panic;
use thiserror::Error;
use tracing::debug;
use triagem_domain::traits::DocumentTextExtractor;

/// Errors raised while reading a PDF
#[derive(Error, Debug)]
pub enum PdfError {
    /// The document could not be opened or decoded
    #[error("PDF could not be parsed: {0}")]
    Parse(String),

    /// The parser panicked on malformed input
    #[error("PDF parser aborted on malformed input")]
    ParserPanicked,
}

/// Extracts the text layer of every page of a PDF
///
/// Pages are concatenated in document order with no separator. Image-only
/// documents produce an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }
}

impl DocumentTextExtractor for PdfTextExtractor {
    type Error = PdfError;

    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error> {
        // pdf-extract can panic on some malformed streams instead of erroring
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| PdfError::ParserPanicked)?
            .map_err(|e| PdfError::Parse(format!("{:?}", e)))?;

        debug!(pages = pages.len(), "Extracted PDF text layer");
        Ok(join_pages(pages))
    }
}

/// Concatenate page texts without inserting page boundaries
fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}
