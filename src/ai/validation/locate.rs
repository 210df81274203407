//! Root fragment isolation
//!
//! First extraction stage: find the first `<Summary>...</Summary>` block in a
//! reply that may carry conversational text before and after it. No parsing
//! happens here; the fragment is returned as-is for the strict parse stage.

use regex::Regex;
use std::sync::LazyLock;

use crate::ai::prompt::tags;
use crate::types::ExtractionError;

// Non-greedy so a reply echoing the template twice yields the first block.
// The opening tag must not end in `/`: a self-closing root bounds nothing.
static ROOT_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    let root = regex::escape(tags::ROOT);
    Regex::new(&format!(r"(?s)<{root}(?:\s[^>]*[^/>]|\s+)?>.*?</{root}\s*>"))
        .expect("root fragment pattern is built from a fixed tag name")
});

/// Locate the first bounded root fragment in a raw reply
pub fn locate_root_fragment(raw_reply: &str) -> Result<&str, ExtractionError> {
    ROOT_FRAGMENT
        .find(raw_reply)
        .map(|m| m.as_str())
        .ok_or_else(|| ExtractionError::StructureNotFound {
            root: tags::ROOT.to_string(),
        })
}
