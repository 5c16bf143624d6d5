//! Submission module - the raw inputs of a single classification request

/// Kind of an uploaded file, decided purely by its filename extension
///
/// No content sniffing is performed: a binary blob named `mail.pdf` is
/// treated as a PDF and will fail later, during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `.txt` file, decoded as UTF-8
    PlainText,

    /// `.pdf` file, handed to the document text extractor
    Pdf,

    /// Any other extension (or none)
    Unsupported,
}

impl FileKind {
    /// Infer the kind from a filename (case-insensitive extension match)
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".txt") {
            FileKind::PlainText
        } else if lower.ends_with(".pdf") {
            FileKind::Pdf
        } else {
            FileKind::Unsupported
        }
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::PlainText => "text",
            FileKind::Pdf => "pdf",
            FileKind::Unsupported => "unsupported",
        }
    }
}

/// A file uploaded alongside (or instead of) pasted email text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied filename; may be empty when the form field was left blank
    pub filename: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create a new uploaded file
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Kind of this file, inferred from its extension
    pub fn kind(&self) -> FileKind {
        FileKind::from_filename(&self.filename)
    }

    /// Whether the client actually picked a file
    pub fn has_filename(&self) -> bool {
        !self.filename.is_empty()
    }
}

/// Everything a client sent for one classification request
///
/// Created per request and dropped once the response is written. When both
/// sources are present, non-blank raw text takes precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailSubmission {
    /// Pasted email text (`email_texto` form field)
    pub raw_text: Option<String>,

    /// Uploaded email file (`email_arquivo` form field)
    pub uploaded_file: Option<UploadedFile>,
}

impl EmailSubmission {
    /// Submission carrying only pasted text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            raw_text: Some(text.into()),
            uploaded_file: None,
        }
    }

    /// Submission carrying only an uploaded file
    pub fn from_file(file: UploadedFile) -> Self {
        Self {
            raw_text: None,
            uploaded_file: Some(file),
        }
    }

    /// Pasted text, if it contains anything besides whitespace
    pub fn usable_text(&self) -> Option<&str> {
        self.raw_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}
