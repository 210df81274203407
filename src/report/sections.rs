//! Flat text projection of a summary, for on-screen display and copying

use serde::Serialize;

use super::headings;
use crate::types::SummaryDocument;

/// The four display strings derived from one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionTexts {
    /// Executive items joined by newline
    pub executive: String,
    pub narrative: String,
    /// Ideas joined by newline
    pub ideas: String,
    /// One "respondent_id: quote_text" string per quote
    pub quotes: Vec<String>,
}

impl SectionTexts {
    pub fn from_document(doc: &SummaryDocument) -> Self {
        Self {
            executive: doc.executive_items.join("\n"),
            narrative: doc.narrative.clone(),
            ideas: doc.ideas.join("\n"),
            quotes: doc.quotes.iter().map(|q| q.display()).collect(),
        }
    }

    /// Copy-ready block with the three prose sections under headings
    pub fn copy_text(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n{}\n\n{}\n{}\n",
            headings::EXECUTIVE,
            self.executive,
            headings::NARRATIVE,
            self.narrative,
            headings::IDEAS,
            self.ideas
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quote;

    fn doc() -> SummaryDocument {
        SummaryDocument {
            executive_items: vec!["A".into(), "B".into()],
            narrative: "N".into(),
            ideas: vec!["I".into()],
            quotes: vec![Quote::new("R1", "Q1"), Quote::new("", "Q2")],
        }
    }

    #[test]
    fn test_flat_strings() {
        let texts = SectionTexts::from_document(&doc());
        assert_eq!(texts.executive, "A\nB");
        assert_eq!(texts.narrative, "N");
        assert_eq!(texts.ideas, "I");
        assert_eq!(texts.quotes, vec!["R1: Q1", ": Q2"]);
    }

    #[test]
    fn test_copy_text_layout() {
        let copy = SectionTexts::from_document(&doc()).copy_text();
        assert_eq!(
            copy,
            "Executive Summary\nA\nB\n\nNarrative Summary\nN\n\nIdeas Worth Exploring\nI\n"
        );
    }

    #[test]
    fn test_empty_document() {
        let texts = SectionTexts::from_document(&SummaryDocument::default());
        assert!(texts.executive.is_empty());
        assert!(texts.quotes.is_empty());
    }
}
