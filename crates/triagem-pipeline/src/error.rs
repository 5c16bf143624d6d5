//! Error types for the classification pipeline
//!
//! Every variant carries the message shown to the end user. Internal details
//! (parser errors, HTTP statuses) are logged where they occur and never
//! copied into these messages.

use thiserror::Error;

/// Message for a request without any usable email content
pub const MSG_NO_CONTENT: &str = "Nenhum conteúdo de email para analisar.";

/// Message for a file field that was sent without a file
pub const MSG_NO_VALID_INPUT: &str = "Nenhum texto ou arquivo válido enviado.";

/// Message for an upload whose extension is neither `.txt` nor `.pdf`
pub const MSG_UNSUPPORTED_FILE: &str =
    "Formato de arquivo não suportado. Envie um arquivo .txt ou .pdf.";

/// Message for a `.txt` upload that is not valid UTF-8
pub const MSG_INVALID_ENCODING: &str = "O arquivo de texto não está codificado em UTF-8.";

/// Message for a PDF that could not be parsed
pub const MSG_UNREADABLE_PDF: &str = "Não foi possível ler o arquivo PDF.";

/// Message for a failed backend call
pub const MSG_BACKEND_FAILED: &str = "Falha ao processar o email com a IA.";

/// Message for a backend reply that is not the expected JSON object
pub const MSG_MALFORMED_RESPONSE: &str = "A IA retornou uma resposta em formato inválido.";

/// Errors that terminate a classification request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No usable email text could be resolved from the submission
    #[error("{0}")]
    NoContentProvided(String),

    /// The uploaded PDF could not be opened or parsed
    #[error("{0}")]
    UnreadablePdf(String),

    /// The backend call failed (network, auth, quota, timeout)
    #[error("{0}")]
    BackendCallFailed(String),

    /// The backend answered, but not with the expected JSON object
    #[error("{0}")]
    MalformedBackendResponse(String),
}

impl PipelineError {
    /// No content at all
    pub fn no_content() -> Self {
        PipelineError::NoContentProvided(MSG_NO_CONTENT.to_string())
    }

    /// File field present but empty
    pub fn no_valid_input() -> Self {
        PipelineError::NoContentProvided(MSG_NO_VALID_INPUT.to_string())
    }

    /// Unreadable PDF
    pub fn unreadable_pdf() -> Self {
        PipelineError::UnreadablePdf(MSG_UNREADABLE_PDF.to_string())
    }

    /// Backend failure
    pub fn backend_failed() -> Self {
        PipelineError::BackendCallFailed(MSG_BACKEND_FAILED.to_string())
    }

    /// Malformed backend output
    pub fn malformed_response() -> Self {
        PipelineError::MalformedBackendResponse(MSG_MALFORMED_RESPONSE.to_string())
    }

    /// Whether the failure was caused by the request itself (4xx) rather
    /// than by the backend (5xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::NoContentProvided(_) | PipelineError::UnreadablePdf(_)
        )
    }

    /// Stable name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NoContentProvided(_) => "no_content_provided",
            PipelineError::UnreadablePdf(_) => "unreadable_pdf",
            PipelineError::BackendCallFailed(_) => "backend_call_failed",
            PipelineError::MalformedBackendResponse(_) => "malformed_backend_response",
        }
    }

    /// User-facing message
    pub fn message(&self) -> &str {
        match self {
            PipelineError::NoContentProvided(msg)
            | PipelineError::UnreadablePdf(msg)
            | PipelineError::BackendCallFailed(msg)
            | PipelineError::MalformedBackendResponse(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_split() {
        assert!(PipelineError::no_content().is_client_error());
        assert!(PipelineError::unreadable_pdf().is_client_error());
        assert!(!PipelineError::backend_failed().is_client_error());
        assert!(!PipelineError::malformed_response().is_client_error());
    }

    #[test]
    fn test_display_is_user_message() {
        assert_eq!(PipelineError::no_content().to_string(), MSG_NO_CONTENT);
        assert_eq!(PipelineError::no_valid_input().message(), MSG_NO_VALID_INPUT);
        assert_eq!(PipelineError::backend_failed().kind(), "backend_call_failed");
    }
}
