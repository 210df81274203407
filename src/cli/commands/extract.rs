//! Extract Command
//!
//! Offline salvage: run extraction and assembly on a saved model reply.
//!
//! Usage:
//!   qualsum extract <REPLY_FILE> --project <ID> [--format ..] [--output-dir ..] [--no-export]

use std::path::{Path, PathBuf};

use crate::cli::commands::generate::{apply_report_overrides, present_summary};
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, read_text_file};
use crate::config::ExportFormat;
use crate::pipeline::summarize_reply;
use crate::report::SectionTexts;
use crate::types::Result;

pub fn run(
    reply_file: &Path,
    project_id: &str,
    format: Option<ExportFormat>,
    output_dir: Option<PathBuf>,
    no_export: bool,
) -> Result<()> {
    let CommandContext { mut config, store } = CommandContext::load()?;
    apply_report_overrides(&mut config.report, format, output_dir, None);

    let project = store.require(project_id)?;
    let raw = read_text_file(reply_file)?;
    let out = Output::new();

    let (document, quality) = summarize_reply(&raw)?;

    present_summary(
        &out,
        project,
        &document,
        &SectionTexts::from_document(&document),
        &quality,
        &config.report,
        !no_export,
    );
    Ok(())
}
