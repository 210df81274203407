//! AI Response Validation and Extraction
//!
//! Turns a semi-trusted model reply into a typed [`SummaryDocument`]:
//!
//! 1. [`locate_root_fragment`]: isolate the first `<Summary>...</Summary>`
//!    block, tolerating prose around it
//! 2. [`parse_markup`]: strict parse of that block into a markup tree
//! 3. [`collect_summary`]: read the four required sections in document order
//!
//! Each stage is independent and testable on its own. No stage repairs
//! content: a truncated or broken block is rejected, never patched.

mod locate;
mod markup;
mod response;

pub use locate::locate_root_fragment;
pub use markup::{MarkupElement, MarkupNode, parse_markup};
pub use response::{
    IssueSeverity, ValidationIssue, ValidationResult, assess_quality, collect_summary,
};

use tracing::debug;

use crate::types::{ExtractionError, SummaryDocument};

/// Extracts a summary document from a raw model reply
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run all three stages; never returns a partial document
    pub fn extract(&self, raw_reply: &str) -> Result<SummaryDocument, ExtractionError> {
        let fragment = locate_root_fragment(raw_reply)?;
        debug!(
            "Located summary fragment ({} of {} bytes)",
            fragment.len(),
            raw_reply.len()
        );

        let root = parse_markup(fragment)?;
        let doc = collect_summary(&root)?;

        debug!(
            "Extracted {} executive items, {} ideas, {} quotes, narrative {} words",
            doc.executive_items.len(),
            doc.ideas.len(),
            doc.quotes.len(),
            doc.narrative_word_count()
        );
        Ok(doc)
    }
}

/// Convenience wrapper around [`ResponseExtractor::extract`]
pub fn extract_summary(raw_reply: &str) -> Result<SummaryDocument, ExtractionError> {
    ResponseExtractor::new().extract(raw_reply)
}
