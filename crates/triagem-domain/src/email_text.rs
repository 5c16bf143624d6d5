//! Resolved email content

use std::fmt;

/// Email text ready to be classified
///
/// Invariant: contains at least one non-whitespace character. The only way to
/// obtain one is [`EmailText::new`], so blank content (an empty paste, an empty
/// `.txt`, an image-only PDF) can never reach the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailText(String);

impl EmailText {
    /// Wrap resolved text, rejecting empty or whitespace-only content
    ///
    /// The text is kept verbatim; surrounding whitespace is not trimmed.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for EmailText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
