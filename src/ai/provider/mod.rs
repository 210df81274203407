//! Completion Provider Abstraction
//!
//! Defines the narrow `CompletionProvider` trait the pipeline talks to:
//! one request in, reply text (or a `ProviderError`) out. Model identifiers
//! and endpoint specifics stay behind this trait so extraction and assembly
//! never depend on a particular provider.

mod anthropic;

pub use anthropic::AnthropicProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::types::{ProviderError, Result};

// =============================================================================
// Request
// =============================================================================

/// One summarization request; immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model_id: String,
    pub max_tokens: u32,
    pub prompt_text: String,
}

impl CompletionRequest {
    pub fn new(model_id: impl Into<String>, max_tokens: u32, prompt_text: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            max_tokens,
            prompt_text: prompt_text.into(),
        }
    }
}

// =============================================================================
// Reply with Usage Metrics
// =============================================================================

/// Raw reply text plus call metrics
#[derive(Debug, Clone)]
pub struct CompletionReply {
    /// Reply text exactly as returned
    pub text: String,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
    /// Provider and model info
    pub metadata: ResponseMetadata,
    /// Provider stopped at the output token cap
    pub truncated: bool,
}

impl CompletionReply {
    /// Create reply with text only (usage unknown)
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
            truncated: false,
        }
    }
}

/// Token usage metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (reply)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// Model that produced the reply
    pub model: String,
    /// Provider name
    pub provider: String,
}

/// Shared provider handle
pub type SharedProvider = Arc<dyn CompletionProvider>;

// =============================================================================
// Provider Trait
// =============================================================================

/// Text-in, text-out completion provider
///
/// A single attempt per call. Implementations never retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionReply, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Create the configured provider
pub fn create_provider(config: &LlmConfig) -> Result<SharedProvider> {
    Ok(Arc::new(AnthropicProvider::new(config)?))
}
