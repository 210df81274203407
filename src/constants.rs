//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Completion provider constants
pub mod llm {
    /// Default summarization model
    pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

    /// Default output token cap for one summary
    pub const DEFAULT_MAX_TOKENS: u32 = 1500;

    /// Default API base URL
    pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

    /// Messages API version header value
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";

    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
}

/// Network constants
pub mod network {
    /// Default bound on the completion call (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    /// TCP connect timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}

/// Cost estimate constants (advisory only)
pub mod cost {
    /// Characters per token heuristic
    pub const CHARS_PER_TOKEN: usize = 4;

    /// USD per token
    pub const USD_PER_TOKEN: f64 = 0.00001;

    /// USD to display currency
    pub const CONVERSION_RATE: f64 = 10.0;

    /// Display currency code
    pub const CURRENCY: &str = "SEK";
}

/// Requested summary shape, mirrored by the quality report
pub mod shape {
    /// Executive bullets requested (inclusive)
    pub const EXECUTIVE_ITEMS: (usize, usize) = (6, 8);

    /// Ideas requested (inclusive)
    pub const IDEAS: (usize, usize) = (6, 8);

    /// Minimum narrative length in words
    pub const NARRATIVE_MIN_WORDS: usize = 400;

    /// Number of quotes requested
    pub const QUOTES: usize = 5;
}

/// Report layout constants
pub mod report {
    /// Default logo width (millimetres)
    pub const LOGO_WIDTH_MM: f32 = 40.0;

    /// Default page margin (millimetres)
    pub const MARGIN_MM: f32 = 15.0;

    /// Metadata timestamp format
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// On-disk layout
pub mod paths {
    /// Project data directory
    pub const DATA_DIR: &str = ".qualsum";

    /// Project store file
    pub const PROJECTS_FILE: &str = ".qualsum/projects.json";

    /// Config file name
    pub const CONFIG_FILE: &str = "config.toml";

    /// Default report output directory
    pub const REPORTS_DIR: &str = "reports";
}
