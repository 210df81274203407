//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global and project (.qualsum/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{cost, llm, network, paths, report};
use crate::types::{QualError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion provider settings
    pub llm: LlmConfig,

    /// Cost estimate settings
    pub cost: CostConfig,

    /// Report export settings
    pub report: ReportConfig,

    /// Project store settings
    pub storage: StorageConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `QualError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.llm.max_tokens == 0 {
            return Err(QualError::Config(
                "llm.max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.llm.timeout_secs == 0 {
            return Err(QualError::Config(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(QualError::Config(format!(
                "llm.temperature must be between 0.0 and 1.0, got {}",
                self.llm.temperature
            )));
        }

        url::Url::parse(&self.llm.api_base).map_err(|e| {
            QualError::Config(format!("llm.api_base '{}' is not a URL: {}", self.llm.api_base, e))
        })?;

        if self.cost.chars_per_token == 0 {
            return Err(QualError::Config(
                "cost.chars_per_token must be greater than 0".to_string(),
            ));
        }

        if self.cost.usd_per_token < 0.0 || self.cost.conversion_rate < 0.0 {
            return Err(QualError::Config(
                "cost rates must not be negative".to_string(),
            ));
        }

        if self.report.margin_mm <= 0.0 || self.report.logo_width_mm <= 0.0 {
            return Err(QualError::Config(
                "report.margin_mm and report.logo_width_mm must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier
    pub model: String,

    /// Output token cap for one summary
    pub max_tokens: u32,

    /// Bound on the completion call in seconds
    pub timeout_secs: u64,

    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,

    /// API base URL
    pub api_base: String,

    /// API key; never serialized to output
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: llm::DEFAULT_MODEL.to_string(),
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.0,
            api_base: llm::DEFAULT_API_BASE.to_string(),
            api_key: None,
        }
    }
}

// =============================================================================
// Cost Configuration
// =============================================================================

/// Heuristic cost estimate; not a billing figure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub chars_per_token: usize,
    pub usd_per_token: f64,
    /// USD to display currency
    pub conversion_rate: f64,
    pub currency: String,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            chars_per_token: cost::CHARS_PER_TOKEN,
            usd_per_token: cost::USD_PER_TOKEN,
            conversion_rate: cost::CONVERSION_RATE,
            currency: cost::CURRENCY.to_string(),
        }
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Print-ready paged HTML
    #[default]
    Html,
    Markdown,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: {}. Valid values: html, markdown",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// (width, height) in millimetres
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }

    pub fn css_name(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output directory for copy text and exports
    pub output_dir: PathBuf,

    pub format: ExportFormat,

    /// Logo placed at the top of the export, if resolvable
    pub logo_path: Option<PathBuf>,

    pub logo_width_mm: f32,

    pub page_size: PageSize,

    /// Uniform page margin
    pub margin_mm: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(paths::REPORTS_DIR),
            format: ExportFormat::default(),
            logo_path: None,
            logo_width_mm: report::LOGO_WIDTH_MM,
            page_size: PageSize::default(),
            margin_mm: report::MARGIN_MM,
        }
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Project store file
    pub projects_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            projects_file: PathBuf::from(paths::PROJECTS_FILE),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
