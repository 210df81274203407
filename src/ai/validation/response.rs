//! Response Validation
//!
//! Third extraction stage and the advisory quality report:
//! - Required sections presence (executive, ideas, quotes); narrative defaults to empty
//! - Item collection in document order
//! - Shape checks against what the prompt asked for (counts, length, ids)
//!
//! Missing sections are errors. Shape problems are only reported; a summary
//! with five executive bullets is still a summary.

use std::fmt;

use super::markup::MarkupElement;
use crate::ai::prompt::tags;
use crate::constants::shape;
use crate::types::{ExtractionError, Quote, SummaryDocument};

/// Severity levels for quality issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Summary usable but deviates from the requested shape
    Warning,
    /// Observation that doesn't affect usability
    Info,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "WARN"),
            IssueSeverity::Info => write!(f, "INFO"),
        }
    }
}

/// A single quality issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    pub location: Option<String>,
}

impl ValidationIssue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            message: message.into(),
            location: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Info,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "[{}] {}: {}", self.severity, location, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Quality report for one summary
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// No issues at all
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }

    fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

// =============================================================================
// Section collection
// =============================================================================

fn required_section<'a>(
    root: &'a MarkupElement,
    name: &str,
) -> Result<&'a MarkupElement, ExtractionError> {
    root.child(name)
        .ok_or_else(|| ExtractionError::SectionMissing {
            section: name.to_string(),
        })
}

/// Collect a `SummaryDocument` from a parsed reply tree
///
/// Executive, ideas and quotes are checked for presence before any item is
/// read. A missing narrative node reads as an empty narrative.
pub fn collect_summary(root: &MarkupElement) -> Result<SummaryDocument, ExtractionError> {
    let executive = required_section(root, tags::EXECUTIVE)?;
    let ideas = required_section(root, tags::IDEAS)?;
    let quotes = required_section(root, tags::QUOTES)?;

    Ok(SummaryDocument {
        executive_items: executive
            .children_named(tags::EXECUTIVE_ITEM)
            .map(MarkupElement::text)
            .collect(),
        narrative: root
            .child(tags::NARRATIVE)
            .map(MarkupElement::text)
            .unwrap_or_default(),
        ideas: ideas
            .children_named(tags::IDEA)
            .map(MarkupElement::text)
            .collect(),
        quotes: quotes
            .children_named(tags::QUOTE)
            .map(|q| Quote::new(q.attribute(tags::QUOTE_ID).unwrap_or_default(), q.text()))
            .collect(),
    })
}

// =============================================================================
// Quality assessment
// =============================================================================

fn check_range(
    result: &mut ValidationResult,
    section: &str,
    count: usize,
    (min, max): (usize, usize),
) {
    if !(min..=max).contains(&count) {
        result.add(
            ValidationIssue::warning(format!(
                "{} items, expected {}–{}",
                count, min, max
            ))
            .at(section),
        );
    }
}

/// Compare a summary against the shape requested in the prompt
pub fn assess_quality(doc: &SummaryDocument) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_range(
        &mut result,
        tags::EXECUTIVE,
        doc.executive_items.len(),
        shape::EXECUTIVE_ITEMS,
    );

    let words = doc.narrative_word_count();
    if words < shape::NARRATIVE_MIN_WORDS {
        result.add(
            ValidationIssue::warning(format!(
                "{} words, expected at least {}",
                words,
                shape::NARRATIVE_MIN_WORDS
            ))
            .at(tags::NARRATIVE),
        );
    }

    check_range(&mut result, tags::IDEAS, doc.ideas.len(), shape::IDEAS);

    if doc.quotes.len() != shape::QUOTES {
        result.add(
            ValidationIssue::warning(format!(
                "{} quotes, expected {}",
                doc.quotes.len(),
                shape::QUOTES
            ))
            .at(tags::QUOTES),
        );
    }

    for (idx, quote) in doc.quotes.iter().enumerate() {
        if quote.respondent_id.trim().is_empty() {
            result.add(
                ValidationIssue::info("quote has no respondent id")
                    .at(format!("{}[{}]", tags::QUOTES, idx)),
            );
        }
    }

    result
}
