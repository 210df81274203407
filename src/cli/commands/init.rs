//! Init Command
//!
//! Initialize qualsum in the current directory.

use crate::config::ConfigLoader;
use crate::constants::paths;
use crate::types::{QualError, Result};

pub fn run(force: bool) -> Result<()> {
    if ConfigLoader::is_project_initialized() && !force {
        return Err(QualError::Config(
            "Already initialized. Use --force to overwrite.".to_string(),
        ));
    }

    let dir = ConfigLoader::init_project(force)?;

    // Global config is a convenience; never overwrite it from here
    if let Err(e) = ConfigLoader::init_global(false) {
        tracing::debug!("Global config init skipped: {}", e);
    }

    println!("✓ Initialized qualsum in {}/", dir.display());
    println!("  Config:   {}", ConfigLoader::project_config_path().display());
    println!("  Projects: {}", paths::PROJECTS_FILE);
    println!();
    println!("Next steps:");
    println!("  1. Save a project:  qualsum project save --id <ID> --question \"...\"");
    println!("  2. Generate:        qualsum generate --project <ID> --responses <FILE>");

    Ok(())
}
