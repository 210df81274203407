//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (<user config dir>/qualsum/config.toml)
//! 3. Project config (.qualsum/config.toml)
//! 4. Environment variables (QUALSUM_* prefix, `__` between nested keys)

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::paths;
use crate::types::{QualError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. QUALSUM_LLM__MAX_TOKENS -> llm.max_tokens
        figment = figment.merge(Env::prefixed("QUALSUM_").split("__").lowercase(true));

        Self::extract(figment)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| QualError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Global config directory (platform config dir + qualsum)
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "qualsum").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(paths::CONFIG_FILE))
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(paths::DATA_DIR)
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join(paths::CONFIG_FILE)
    }

    /// Check if project is initialized
    pub fn is_project_initialized() -> bool {
        Self::project_dir().exists()
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration in the requested format
    pub fn render_config(config: &Config, format: &str) -> Result<String> {
        match format {
            "json" => Ok(serde_json::to_string_pretty(config)?),
            "yaml" => Ok(serde_yaml::to_string(config)?),
            _ => toml::to_string_pretty(config).map_err(|e| QualError::Config(e.to_string())),
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            QualError::Config("Cannot determine global config directory".to_string())
        })?;
        fs::create_dir_all(&global_dir)?;

        let config_path = global_dir.join(paths::CONFIG_FILE);
        Self::write_default(&config_path, force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        fs::create_dir_all(&project_dir)?;

        Self::write_default(&Self::project_config_path(), force)?;
        Ok(project_dir)
    }

    fn write_default(path: &Path, force: bool) -> Result<()> {
        if !path.exists() || force {
            fs::write(path, Self::default_config())?;
            info!("Created config: {}", path.display());
        } else {
            info!("Config exists: {}", path.display());
        }
        Ok(())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default config content (TOML)
    fn default_config() -> String {
        r#"# qualsum configuration
# Project settings in .qualsum/config.toml override the global file.

[llm]
model = "claude-sonnet-4-5-20250929"
max_tokens = 1500
timeout_secs = 300
# api_key is read from ANTHROPIC_API_KEY when unset

# Advisory estimate shown before generation
[cost]
chars_per_token = 4
usd_per_token = 0.00001
conversion_rate = 10.0
currency = "SEK"

[report]
output_dir = "reports"
format = "html"
# logo_path = "logo.png"
logo_width_mm = 40.0
page_size = "a4"
margin_mm = 15.0

[storage]
projects_file = ".qualsum/projects.json"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, ConfigLoader::default_config()).unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.llm.max_tokens, 1500);
        assert_eq!(config.cost.currency, "SEK");
        assert!(config.report.logo_path.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[llm]\nmax_tokens = 4000\n[report]\nformat = \"markdown\"\n").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.llm.max_tokens, 4000);
        assert_eq!(config.llm.timeout_secs, 300);
        assert_eq!(config.report.format, crate::config::ExportFormat::Markdown);
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[llm]\ntimeout_secs = 0\n").unwrap();

        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(QualError::Config(_))
        ));
    }

    #[test]
    fn test_render_formats() {
        let config = Config::default();
        assert!(ConfigLoader::render_config(&config, "json").unwrap().contains("\"max_tokens\": 1500"));
        assert!(ConfigLoader::render_config(&config, "yaml").unwrap().contains("max_tokens: 1500"));
        assert!(ConfigLoader::render_config(&config, "toml").unwrap().contains("max_tokens = 1500"));
    }

    #[test]
    fn test_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("QUALSUM_LLM__MAX_TOKENS", "2048");
            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.llm.max_tokens, 2048);
            Ok(())
        });
    }
}
