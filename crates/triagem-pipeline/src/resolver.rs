//! Decide which input of a submission holds the email to classify

use crate::error::{PipelineError, MSG_INVALID_ENCODING, MSG_UNSUPPORTED_FILE};
use triagem_domain::{EmailSubmission, FileKind};
use tracing::{debug, warn};

/// Where the email text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    /// `email_texto` form field
    Pasted,
    /// Uploaded `.txt` file
    TextFile,
    /// Uploaded `.pdf` file
    Pdf,
}

impl TextOrigin {
    /// Get the origin name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TextOrigin::Pasted => "pasted",
            TextOrigin::TextFile => "text_file",
            TextOrigin::Pdf => "pdf",
        }
    }
}

/// Outcome of resolving a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    /// Final text, no extraction needed
    Text {
        /// The text, verbatim
        text: String,
        /// Where it came from
        origin: TextOrigin,
    },
    /// PDF bytes that still need to go through the document extractor
    Pdf(Vec<u8>),
}

/// Pick the single authoritative source of email text
///
/// Precedence: non-blank pasted text, then an uploaded `.txt` or `.pdf` file.
/// The file kind comes from its extension only.
pub fn resolve_text_source(submission: EmailSubmission) -> Result<ResolvedSource, PipelineError> {
    if submission.usable_text().is_some() {
        let text = submission.raw_text.unwrap_or_default();
        debug!(chars = text.len(), "Using pasted email text");
        return Ok(ResolvedSource::Text {
            text,
            origin: TextOrigin::Pasted,
        });
    }

    let Some(file) = submission.uploaded_file else {
        return Err(PipelineError::no_content());
    };

    if !file.has_filename() {
        return Err(PipelineError::no_valid_input());
    }

    match file.kind() {
        FileKind::PlainText => match String::from_utf8(file.bytes) {
            Ok(text) => {
                debug!(filename = %file.filename, bytes = text.len(), "Using uploaded text file");
                Ok(ResolvedSource::Text {
                    text,
                    origin: TextOrigin::TextFile,
                })
            }
            Err(e) => {
                warn!(filename = %file.filename, error = %e, "Uploaded text file is not valid UTF-8");
                Err(PipelineError::NoContentProvided(MSG_INVALID_ENCODING.to_string()))
            }
        },
        FileKind::Pdf => {
            debug!(filename = %file.filename, bytes = file.bytes.len(), "Uploaded PDF needs extraction");
            Ok(ResolvedSource::Pdf(file.bytes))
        }
        FileKind::Unsupported => {
            warn!(filename = %file.filename, "Rejected upload with unsupported extension");
            Err(PipelineError::NoContentProvided(MSG_UNSUPPORTED_FILE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MSG_NO_CONTENT;
    use triagem_domain::UploadedFile;

    #[test]
    fn test_pasted_text_wins_over_file() {
        let submission = EmailSubmission {
            raw_text: Some("Please send the invoice status".to_string()),
            uploaded_file: Some(UploadedFile::new("mail.pdf", b"%PDF-1.4".to_vec())),
        };
        let resolved = resolve_text_source(submission).unwrap();
        assert_eq!(
            resolved,
            ResolvedSource::Text {
                text: "Please send the invoice status".to_string(),
                origin: TextOrigin::Pasted,
            }
        );
    }

    #[test]
    fn test_blank_text_falls_through_to_file() {
        let submission = EmailSubmission {
            raw_text: Some("   \n".to_string()),
            uploaded_file: Some(UploadedFile::new("mail.txt", "Olá equipe".as_bytes().to_vec())),
        };
        let resolved = resolve_text_source(submission).unwrap();
        assert_eq!(
            resolved,
            ResolvedSource::Text {
                text: "Olá equipe".to_string(),
                origin: TextOrigin::TextFile,
            }
        );
    }

    #[test]
    fn test_pdf_bytes_passed_through() {
        let bytes = b"%PDF-1.4 fake".to_vec();
        let submission = EmailSubmission::from_file(UploadedFile::new("scan.PDF", bytes.clone()));
        assert_eq!(
            resolve_text_source(submission).unwrap(),
            ResolvedSource::Pdf(bytes)
        );
    }

    #[test]
    fn test_nothing_submitted() {
        let err = resolve_text_source(EmailSubmission::default()).unwrap_err();
        assert_eq!(err, PipelineError::NoContentProvided(MSG_NO_CONTENT.to_string()));
    }

    #[test]
    fn test_empty_filename() {
        let submission = EmailSubmission::from_file(UploadedFile::new("", Vec::new()));
        assert_eq!(
            resolve_text_source(submission).unwrap_err(),
            PipelineError::no_valid_input()
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let submission = EmailSubmission::from_file(UploadedFile::new("notes.docx", b"PK".to_vec()));
        let err = resolve_text_source(submission).unwrap_err();
        assert!(matches!(err, PipelineError::NoContentProvided(_)));
        assert_eq!(err.message(), MSG_UNSUPPORTED_FILE);
    }

    #[test]
    fn test_invalid_utf8_text_file() {
        let submission = EmailSubmission::from_file(UploadedFile::new("mail.txt", vec![0xff, 0xfe, 0x00]));
        let err = resolve_text_source(submission).unwrap_err();
        assert_eq!(err.message(), MSG_INVALID_ENCODING);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use triagem_domain::UploadedFile;

    proptest! {
        /// Property: a .txt upload resolves to its exact UTF-8 content
        #[test]
        fn test_text_file_is_byte_for_byte(content in "\\PC*") {
            let submission = EmailSubmission::from_file(UploadedFile::new("mail.txt", content.as_bytes().to_vec()));
            match resolve_text_source(submission) {
                Ok(ResolvedSource::Text { text, origin }) => {
                    prop_assert_eq!(text.as_bytes(), content.as_bytes());
                    prop_assert_eq!(origin, TextOrigin::TextFile);
                }
                other => return Err(TestCaseError::fail(format!("unexpected: {:?}", other))),
            }
        }

        /// Property: non-blank pasted text is selected verbatim whatever the file
        #[test]
        fn test_pasted_text_always_selected(text in "[a-zA-Z0-9 ]{0,20}[a-zA-Z0-9]", name in "[a-z]{1,8}\\.(pdf|txt|docx)") {
            let submission = EmailSubmission {
                raw_text: Some(text.clone()),
                uploaded_file: Some(UploadedFile::new(name, vec![0u8; 4])),
            };
            let resolved = resolve_text_source(submission);
            prop_assert_eq!(resolved, Ok(ResolvedSource::Text { text, origin: TextOrigin::Pasted }));
        }
    }
}
