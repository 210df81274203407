//! qualsum - Qualitative Interview Summarizer
//!
//! Turns free-text interview responses into a structured research summary
//! (executive bullets, narrative, ideas worth exploring, top quotes) with a
//! single model call, then extracts and assembles the result
//! deterministically.
//!
//! ## Pipeline
//!
//! 1. **Context header**: project metadata and interview guide
//! 2. **Prompt**: header, instructions, reply template, raw responses
//! 3. **Completion**: one bounded call through [`CompletionProvider`]
//! 4. **Extraction**: locate, strictly parse and collect the reply block
//! 5. **Assembly**: display sections, copy text and export blocks
//!
//! ## Quick Start
//!
//! ```ignore
//! use qualsum::{ConfigLoader, PipelineSettings, SummaryPipeline, create_provider};
//!
//! let config = ConfigLoader::load()?;
//! let provider = create_provider(&config.llm)?;
//! let pipeline = SummaryPipeline::new(provider, PipelineSettings::from_config(&config));
//! let run = pipeline.run(&project, &raw_responses).await?;
//! println!("{}", run.sections.executive);
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt composition, provider, extraction, cost estimate
//! - [`report`]: flat sections, export blocks, renderers
//! - [`storage`]: JSON project store
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ExportFormat};

// Error Types
pub use types::error::{ErrorCategory, ExtractionError, ProviderError, QualError, Result, ResultExt};

// Domain
pub use types::{ProjectContext, Quote, SummaryDocument};

// Storage
pub use storage::ProjectStore;

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use pipeline::{PipelineSettings, SummaryPipeline, SummaryRun};

pub use ai::{
    CompletionProvider, CompletionReply, CompletionRequest, CostEstimator, ResponseExtractor,
    create_provider, extract_summary,
};

pub use report::{RenderBlock, SectionTexts, assemble_blocks};
