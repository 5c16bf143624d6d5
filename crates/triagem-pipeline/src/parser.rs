//! Validate backend output against the classification contract

use crate::error::PipelineError;
use serde::Deserialize;
use tracing::warn;
use triagem_domain::{Classification, ClassificationResult};

/// A backend reply that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClassification {
    /// Typed result
    pub result: ClassificationResult,

    /// The validated JSON text, exactly as the backend produced it (minus fences)
    pub json: String,
}

/// Wire shape of the answer; any other key is rejected
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireClassification {
    classificacao: String,
    sugestao_resposta: String,
}

/// Parse a backend reply into a classification
///
/// Markdown code fences are stripped first. The remaining text must be a JSON
/// object with exactly `classificacao` (one of the two labels) and
/// `sugestao_resposta` (a string).
pub fn parse_classification(response: &str) -> Result<ParsedClassification, PipelineError> {
    let json = strip_code_fences(response);

    let wire: WireClassification = serde_json::from_str(&json).map_err(|e| {
        warn!(error = %e, response = %preview(response), "Backend reply is not the expected JSON object");
        PipelineError::malformed_response()
    })?;

    let classification = Classification::parse(&wire.classificacao).ok_or_else(|| {
        warn!(value = %wire.classificacao, "Backend reply has an unknown classification");
        PipelineError::malformed_response()
    })?;

    Ok(ParsedClassification {
        result: ClassificationResult::new(classification, wire.sugestao_resposta),
        json,
    })
}

/// Remove a surrounding markdown code fence (```json or ```) and whitespace
///
/// Only the opening and closing fence are removed; backticks inside the JSON
/// are left alone.
fn strip_code_fences(response: &str) -> String {
    let mut text = response.trim();
    if let Some(rest) = text.strip_prefix("```json").or_else(|| text.strip_prefix("```")) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim().to_string()
}

/// First characters of a response, for logs
fn preview(response: &str) -> String {
    const MAX_CHARS: usize = 200;
    let mut preview: String = response.chars().take(MAX_CHARS).collect();
    if response.chars().nth(MAX_CHARS).is_some() {
        preview.push('…');
    }
    preview
}
