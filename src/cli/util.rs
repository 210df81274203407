//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigLoader};
use crate::storage::ProjectStore;
use crate::types::{QualError, Result, ResultExt};

/// Command execution context
///
/// Loaded configuration plus the project store it points at.
pub struct CommandContext {
    pub config: Config,
    pub store: ProjectStore,
}

impl CommandContext {
    /// Validates initialization, loads config and opens the project store
    pub fn load() -> Result<Self> {
        require_initialized()?;
        let config = ConfigLoader::load()?;
        let store = ProjectStore::open(&config.storage.projects_file)?;
        Ok(Self { config, store })
    }
}

/// Check if the current directory has been initialized
pub fn is_initialized() -> bool {
    ConfigLoader::is_project_initialized()
}

/// Require initialization, returning the data directory
pub fn require_initialized() -> Result<PathBuf> {
    if !is_initialized() {
        return Err(QualError::NotInitialized);
    }
    Ok(ConfigLoader::project_dir())
}

/// Read a UTF-8 text input, naming the file on failure
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(format!("Cannot read {}", path.display()))
}
