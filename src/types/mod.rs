pub mod error;
pub mod project;
pub mod summary;

pub use error::{
    ErrorCategory, ErrorClassifier, ExtractionError, ProviderError, QualError, Result, ResultExt,
    ValidationError, ValidationErrorKind,
};
pub use project::ProjectContext;
pub use summary::{Quote, SummaryDocument};

// =============================================================================
// Domain Newtypes
// =============================================================================

use serde::Serialize;
use std::fmt;

/// Type-safe wrapper for summary run IDs
///
/// Correlates log lines and output files of a single generation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for display
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type-safe wrapper for token counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct TokenCount(u64);

impl TokenCount {
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenCount {
    fn from(count: u64) -> Self {
        Self(count)
    }
}

impl From<usize> for TokenCount {
    fn from(count: usize) -> Self {
        Self(count as u64)
    }
}

#[cfg(test)]
mod newtype_tests {
    use super::*;

    #[test]
    fn test_run_id_short() {
        let id = RunId::from("0123456789abcdef");
        assert_eq!(id.short(), "01234567");
        assert_eq!(RunId::from("abc").short(), "abc");
    }

    #[test]
    fn test_generated_run_ids_differ() {
        assert_ne!(RunId::generate(), RunId::generate());
    }

    #[test]
    fn test_token_count_ordering() {
        assert!(TokenCount::new(3) > TokenCount::default());
        assert_eq!(TokenCount::from(7usize).get(), 7);
    }
}
