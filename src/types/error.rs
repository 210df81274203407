//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Families
//!
//! - **Input validation**: rejected before any request is built
//! - **Provider**: the completion call failed (auth, rate-limit, network, timeout)
//! - **Extraction**: the reply did not contain a usable structured document
//! - **Render**: export failed; on-screen sections are unaffected
//!
//! Every error is terminal for the current generation run. Nothing here is
//! retried automatically.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Provider failure categories, used for reporting only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited by the provider
    RateLimit,
    /// Authentication or permission failure
    Auth,
    /// Connectivity issues
    Network,
    /// No reply within the configured bound
    Timeout,
    /// Provider unavailable or returned a server error
    Unavailable,
    /// Request rejected as invalid
    BadRequest,
    /// Provider answered but the envelope was unusable
    InvalidResponse,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// Provider Error
// =============================================================================

/// Completion provider failure carrying the provider's own message
#[derive(Debug, Clone)]
pub struct ProviderError {
    /// Error category for reporting
    pub category: ErrorCategory,
    /// Message as reported by the provider (or transport)
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    /// Create error with provider context
    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Bounded wait elapsed before the provider answered
    pub fn timeout(operation: &str, duration: Duration) -> Self {
        Self::new(
            ErrorCategory::Timeout,
            format!("{} timed out after {:?}", operation, duration),
        )
    }

    pub fn is_timeout(&self) -> bool {
        self.category == ErrorCategory::Timeout
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps transport messages and HTTP statuses onto error categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify a transport-level error message
    pub fn classify(message: &str, provider: &str) -> ProviderError {
        let lower = message.to_lowercase();

        if lower.contains("timed out") || lower.contains("timeout") {
            return ProviderError::with_provider(ErrorCategory::Timeout, message, provider);
        }

        if lower.contains("rate limit") || lower.contains("too many requests") {
            return ProviderError::with_provider(ErrorCategory::RateLimit, message, provider);
        }

        if lower.contains("api key")
            || lower.contains("unauthorized")
            || lower.contains("permission denied")
        {
            return ProviderError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("network")
            || lower.contains("unreachable")
        {
            return ProviderError::with_provider(ErrorCategory::Network, message, provider);
        }

        ProviderError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> ProviderError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 | 404 | 413 | 422 => ErrorCategory::BadRequest,
            408 | 504 => ErrorCategory::Timeout,
            500..=599 => ErrorCategory::Unavailable,
            _ => ErrorCategory::Unknown,
        };
        ProviderError::with_provider(category, message, provider)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input rejected before a request is built
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Invalid '{}': {}", field, self.message)
        } else {
            write!(f, "Invalid input: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn empty_responses() -> Self {
        Self::new(
            ValidationErrorKind::EmptyResponses,
            "paste at least one response",
        )
        .with_field("responses")
    }

    pub fn no_questions() -> Self {
        Self::new(
            ValidationErrorKind::NoQuestions,
            "enter at least one interview question",
        )
        .with_field("questions")
    }

    pub fn missing_project_id() -> Self {
        Self::new(
            ValidationErrorKind::MissingProjectId,
            "a project id is required to save a project",
        )
        .with_field("project_id")
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Raw responses are blank
    EmptyResponses,
    /// Question list is empty
    NoQuestions,
    /// Store write without an identity key
    MissingProjectId,
}

// =============================================================================
// Extraction Error
// =============================================================================

/// Failure to recover a `SummaryDocument` from a model reply
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// No `<root>...</root>` bounded fragment in the reply
    #[error("structure not found: no <{root}>...</{root}> block in the reply")]
    StructureNotFound { root: String },

    /// The fragment was located but is not well-formed markup
    #[error("malformed markup: {diagnostic}")]
    MalformedMarkup { diagnostic: String },

    /// A required section element is absent from the root
    #[error("section missing: <{section}> not found in the reply")]
    SectionMissing { section: String },
}

impl ExtractionError {
    pub fn malformed(diagnostic: impl std::fmt::Display) -> Self {
        Self::MalformedMarkup {
            diagnostic: diagnostic.to_string(),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum QualError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Pipeline Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    InputValidation(ValidationError),

    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Extraction failure; the raw reply travels with it for diagnosis
    #[error("Extraction failed: {error}")]
    Extraction {
        #[source]
        error: ExtractionError,
        raw_reply: String,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Render error: {0}")]
    Render(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not initialized: run 'qualsum init' first")]
    NotInitialized,
}

impl From<ProviderError> for QualError {
    fn from(err: ProviderError) -> Self {
        QualError::Provider(err)
    }
}

impl From<ValidationError> for QualError {
    fn from(err: ValidationError) -> Self {
        QualError::InputValidation(err)
    }
}

pub type Result<T> = std::result::Result<T, QualError>;

impl QualError {
    /// Attach the raw reply to an extraction failure
    pub fn extraction(error: ExtractionError, raw_reply: impl Into<String>) -> Self {
        Self::Extraction {
            error,
            raw_reply: raw_reply.into(),
        }
    }

    /// Raw model reply, if this error carries one
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            Self::Extraction { raw_reply, .. } => Some(raw_reply),
            _ => None,
        }
    }

    pub fn is_input_validation(&self) -> bool {
        matches!(self, Self::InputValidation(_))
    }
}

// =============================================================================
// Result Extension Trait
// =============================================================================

/// Extension trait for adding context to foreign errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| QualError::Storage(format!("{}: {}", context.into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::Timeout.to_string(), "TIMEOUT");
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
    }

    #[test]
    fn test_classify_http_status() {
        let err = ErrorClassifier::classify_http_status(429, "slow down", "anthropic");
        assert_eq!(err.category, ErrorCategory::RateLimit);
        assert_eq!(err.provider.as_deref(), Some("anthropic"));

        let err = ErrorClassifier::classify_http_status(401, "bad key", "anthropic");
        assert_eq!(err.category, ErrorCategory::Auth);

        let err = ErrorClassifier::classify_http_status(529, "overloaded", "anthropic");
        assert_eq!(err.category, ErrorCategory::Unavailable);

        let err = ErrorClassifier::classify_http_status(418, "teapot", "anthropic");
        assert_eq!(err.category, ErrorCategory::Unknown);
    }

    #[test]
    fn test_classify_transport_message() {
        let err = ErrorClassifier::classify("operation timed out", "anthropic");
        assert!(err.is_timeout());

        let err = ErrorClassifier::classify("error trying to connect: dns error", "anthropic");
        assert_eq!(err.category, ErrorCategory::Network);
    }

    #[test]
    fn test_provider_error_display_keeps_message() {
        let err = ProviderError::with_provider(ErrorCategory::Auth, "invalid x-api-key", "anthropic");
        assert_eq!(err.to_string(), "[anthropic:AUTH] invalid x-api-key");

        let wrapped: QualError = err.into();
        assert!(wrapped.to_string().contains("invalid x-api-key"));
    }

    #[test]
    fn test_extraction_error_carries_raw_reply() {
        let err = QualError::extraction(
            ExtractionError::StructureNotFound {
                root: "Summary".to_string(),
            },
            "Sorry, I cannot help.",
        );
        assert_eq!(err.raw_reply(), Some("Sorry, I cannot help."));
        assert!(err.to_string().contains("<Summary>"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::no_questions();
        assert_eq!(err.kind, ValidationErrorKind::NoQuestions);
        assert!(err.to_string().starts_with("Invalid 'questions'"));

        let wrapped: QualError = err.into();
        assert!(wrapped.is_input_validation());
    }
}
