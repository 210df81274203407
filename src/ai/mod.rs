//! AI Integration Layer
//!
//! Prompt composition, the completion provider, reply extraction and the
//! advisory cost estimate.

pub mod cost;
pub mod prompt;
pub mod provider;
pub mod timeout;
pub mod validation;

pub use cost::{CostEstimate, CostEstimator};
pub use prompt::{PromptBuilder, PromptSection, build_context_header, compose_summary_prompt};
pub use provider::{
    AnthropicProvider, CompletionProvider, CompletionReply, CompletionRequest, ResponseMetadata,
    ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
pub use timeout::with_timeout;
pub use validation::{ResponseExtractor, ValidationIssue, ValidationResult, extract_summary};
