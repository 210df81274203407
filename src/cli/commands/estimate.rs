//! Estimate Command
//!
//! Advisory token and cost estimate for a responses file.

use std::path::Path;

use crate::ai::CostEstimator;
use crate::cli::ui::Output;
use crate::cli::util::read_text_file;
use crate::config::ConfigLoader;
use crate::types::Result;

pub fn run(responses: &Path) -> Result<()> {
    let config = ConfigLoader::load()?;
    let raw = read_text_file(responses)?;

    let estimate = CostEstimator::from_config(&config.cost).estimate(&raw);
    Output::new().info(&estimate.to_string());
    Ok(())
}
