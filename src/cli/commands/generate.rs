//! Generate Command
//!
//! Run the summary pipeline for a stored project and a responses file.
//!
//! Usage:
//!   qualsum generate --project <ID> --responses <FILE> [--model ..] [--max-tokens ..]
//!                    [--format html|markdown] [--output-dir ..] [--logo ..]
//!                    [--no-export] [--dry-run] [--save-reply <FILE>]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::runtime::Runtime;
use tracing::warn;

use crate::ai::{ValidationResult, create_provider};
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, read_text_file};
use crate::config::{ExportFormat, ReportConfig};
use crate::pipeline::{PipelineSettings, SummaryPipeline, prepare_request};
use crate::report::{
    ExportOutcome, PageGeometry, SectionTexts, assemble_blocks, export_report, headings,
    renderer_for, resolve_logo,
};
use crate::types::{ProjectContext, QualError, Result, SummaryDocument};

#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub project: String,
    pub responses: PathBuf,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub format: Option<ExportFormat>,
    pub output_dir: Option<PathBuf>,
    pub logo: Option<PathBuf>,
    pub no_export: bool,
    pub dry_run: bool,
    pub save_reply: Option<PathBuf>,
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let CommandContext { mut config, store } = CommandContext::load()?;

    if let Some(model) = options.model {
        config.llm.model = model;
    }
    if let Some(max_tokens) = options.max_tokens {
        config.llm.max_tokens = max_tokens;
    }
    apply_report_overrides(
        &mut config.report,
        options.format,
        options.output_dir,
        options.logo,
    );
    config.validate()?;

    let project = store.require(&options.project)?.clone();
    let raw = read_text_file(&options.responses)?;
    let settings = PipelineSettings::from_config(&config);
    let out = Output::new();

    if options.dry_run {
        let prepared = prepare_request(&settings, &project, &raw)?;
        out.section("Prompt");
        println!("{}", prepared.request.prompt_text);
        out.info(&format!(
            "Model: {} · max tokens: {}",
            prepared.request.model_id, prepared.request.max_tokens
        ));
        out.info(&prepared.estimate.to_string());
        return Ok(());
    }

    let pipeline = SummaryPipeline::new(create_provider(&config.llm)?, settings);
    let rt = Runtime::new()?;

    let run = match rt.block_on(pipeline.run(&project, &raw)) {
        Ok(run) => run,
        Err(e) => {
            show_failed_reply(&out, &e, options.save_reply.as_deref());
            return Err(e);
        }
    };

    if let Some(path) = &options.save_reply {
        save_reply(&out, path, &run.reply.text);
    }
    if run.reply.truncated {
        out.warning("The reply hit the token limit; consider raising --max-tokens");
    }

    present_summary(
        &out,
        &project,
        &run.document,
        &run.sections,
        &run.quality,
        &config.report,
        !options.no_export,
    );
    out.info(&run.estimate.to_string());
    Ok(())
}

pub(crate) fn apply_report_overrides(
    report: &mut ReportConfig,
    format: Option<ExportFormat>,
    output_dir: Option<PathBuf>,
    logo: Option<PathBuf>,
) {
    if let Some(format) = format {
        report.format = format;
    }
    if let Some(output_dir) = output_dir {
        report.output_dir = output_dir;
    }
    if let Some(logo) = logo {
        report.logo_path = Some(logo);
    }
}

/// Print the four sections and quality notes, then write copy text and export
///
/// File output is best-effort: failures are reported and never discard the
/// on-screen result.
pub(crate) fn present_summary(
    out: &Output,
    project: &ProjectContext,
    document: &SummaryDocument,
    sections: &SectionTexts,
    quality: &ValidationResult,
    report: &ReportConfig,
    export: bool,
) {
    out.header(&format!("Summary · {}", project.file_stem()));
    out.block(headings::EXECUTIVE, &sections.executive);
    out.block(headings::NARRATIVE, &sections.narrative);
    out.block(headings::IDEAS, &sections.ideas);
    out.block(headings::QUOTES, &sections.quotes.join("\n"));

    if !quality.is_clean() {
        out.section("Quality");
        for issue in &quality.issues {
            out.warning(&issue.to_string());
        }
    }

    if !export {
        return;
    }

    let stem = project.file_stem();
    let copy_path = report.output_dir.join(format!("{}_summary.txt", stem));
    match write_copy_text(&copy_path, sections) {
        Ok(()) => out.success(&format!("Copy text: {}", copy_path.display())),
        Err(e) => out.warning(&format!("Copy text not written: {}", e)),
    }

    let logo = report
        .logo_path
        .as_deref()
        .and_then(|path| resolve_logo(path, report.logo_width_mm));
    let blocks = assemble_blocks(document, project, logo.as_ref(), &Local::now().naive_local());
    let renderer = renderer_for(report.format);

    match export_report(
        &blocks,
        &PageGeometry::from_config(report),
        renderer.as_ref(),
        &report.output_dir,
        &stem,
    ) {
        ExportOutcome::Written(path) => out.success(&format!("Export: {}", path.display())),
        ExportOutcome::Unavailable { reason } => {
            out.warning(&format!("Export unavailable: {}", reason))
        }
    }
}

fn write_copy_text(path: &Path, sections: &SectionTexts) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, sections.copy_text())
}

/// Show and optionally save the reply behind an extraction failure
///
/// The error message itself is printed once, by the binary's error boundary.
fn show_failed_reply(out: &Output, err: &QualError, save_path: Option<&Path>) -> bool {
    let Some(reply) = err.raw_reply() else {
        return false;
    };
    if let Some(path) = save_path {
        save_reply(out, path, reply);
    }
    out.section("Raw reply");
    println!("{}", reply);
    true
}

fn save_reply(out: &Output, path: &Path, reply: &str) {
    match fs::write(path, reply) {
        Ok(()) => out.info(&format!("Raw reply saved to {}", path.display())),
        Err(e) => warn!("Cannot save raw reply to {}: {}", path.display(), e),
    }
}
