//! Classification module - the label and reply produced for an email

use std::fmt;

/// Two-valued triage label
///
/// - Productive: the email needs an action (a request, a technical question,
///   a status update)
/// - Unproductive: nothing to do right away (spam, congratulations, thanks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Requires action
    Productive,

    /// No immediate action needed
    Unproductive,
}

impl Classification {
    /// Wire label, as it appears in the `classificacao` field
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Productive => "Produtivo",
            Classification::Unproductive => "Improdutivo",
        }
    }

    /// Parse a wire label (exact match)
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Produtivo" => Some(Classification::Productive),
            "Improdutivo" => Some(Classification::Unproductive),
            _ => None,
        }
    }

    /// All accepted wire labels
    pub fn labels() -> [&'static str; 2] {
        [
            Classification::Productive.label(),
            Classification::Unproductive.label(),
        ]
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated output of one classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Triage label
    pub classification: Classification,

    /// Reply suggested by the backend, free text
    pub suggested_reply: String,
}

impl ClassificationResult {
    /// Create a new result
    pub fn new(classification: Classification, suggested_reply: impl Into<String>) -> Self {
        Self {
            classification,
            suggested_reply: suggested_reply.into(),
        }
    }

    /// Whether the email needs an action
    pub fn requires_action(&self) -> bool {
        self.classification == Classification::Productive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for label in Classification::labels() {
            let parsed = Classification::parse(label).unwrap();
            assert_eq!(parsed.label(), label);
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Classification::parse("produtivo"), None);
        assert_eq!(Classification::parse("Productive"), None);
        assert_eq!(Classification::parse(" Produtivo"), None);
        assert_eq!(Classification::parse(""), None);
    }

    #[test]
    fn test_requires_action() {
        assert!(ClassificationResult::new(Classification::Productive, "ok").requires_action());
        assert!(!ClassificationResult::new(Classification::Unproductive, "ok").requires_action());
    }
}
