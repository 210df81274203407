//! Structured summary produced by one generation run

use serde::{Deserialize, Serialize};

/// Verbatim quote attributed to a respondent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Opaque respondent identifier; empty when the reply omitted it
    pub respondent_id: String,
    pub text: String,
}

impl Quote {
    pub fn new(respondent_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            respondent_id: respondent_id.into(),
            text: text.into(),
        }
    }

    /// "respondent_id: quote_text"
    pub fn display(&self) -> String {
        format!("{}: {}", self.respondent_id, self.text)
    }
}

/// Canonical structured result of a summary run
///
/// All four fields are always present after extraction. Sequences may be
/// empty and `narrative` may be the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub executive_items: Vec<String>,
    pub narrative: String,
    pub ideas: Vec<String>,
    pub quotes: Vec<Quote>,
}

impl SummaryDocument {
    pub fn narrative_word_count(&self) -> usize {
        self.narrative.split_whitespace().count()
    }

    pub fn is_empty(&self) -> bool {
        self.executive_items.is_empty()
            && self.narrative.is_empty()
            && self.ideas.is_empty()
            && self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_display() {
        assert_eq!(Quote::new("R1", "Too slow.").display(), "R1: Too slow.");
        assert_eq!(Quote::new("", "Anonymous.").display(), ": Anonymous.");
    }

    #[test]
    fn test_narrative_word_count() {
        let doc = SummaryDocument {
            narrative: "one two\nthree".to_string(),
            ..Default::default()
        };
        assert_eq!(doc.narrative_word_count(), 3);
        assert!(!doc.is_empty());
        assert!(SummaryDocument::default().is_empty());
    }
}
