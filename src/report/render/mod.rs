//! Document Renderers
//!
//! A renderer turns an ordered [`RenderBlock`] sequence plus page geometry
//! into bytes. Export never blocks the on-screen result: any renderer or
//! write failure becomes [`ExportOutcome::Unavailable`].

mod html;
mod markdown;

pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::blocks::RenderBlock;
use crate::config::{ExportFormat, PageSize, ReportConfig};
use crate::types::Result;

/// Page size and uniform margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_size: PageSize,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            page_size: config.page_size,
            margin_mm: config.margin_mm,
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

/// Turns export blocks into a document
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, blocks: &[RenderBlock], geometry: &PageGeometry) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;
}

pub fn renderer_for(format: ExportFormat) -> Box<dyn DocumentRenderer> {
    match format {
        ExportFormat::Html => Box::new(HtmlRenderer),
        ExportFormat::Markdown => Box::new(MarkdownRenderer),
    }
}

/// Result of one export attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    Unavailable { reason: String },
}

impl ExportOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportOutcome::Written(path) => Some(path),
            ExportOutcome::Unavailable { .. } => None,
        }
    }
}

/// `<stem>_summary.<ext>`
pub fn export_file_name(stem: &str, renderer: &dyn DocumentRenderer) -> String {
    format!("{}_summary.{}", stem, renderer.extension())
}

/// Render and write the export, degrading to `Unavailable` on any failure
pub fn export_report(
    blocks: &[RenderBlock],
    geometry: &PageGeometry,
    renderer: &dyn DocumentRenderer,
    output_dir: &Path,
    stem: &str,
) -> ExportOutcome {
    let bytes = match renderer.render(blocks, geometry) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Export unavailable: {}", e);
            return ExportOutcome::Unavailable {
                reason: e.to_string(),
            };
        }
    };

    let path = output_dir.join(export_file_name(stem, renderer));
    let written = fs::create_dir_all(output_dir).and_then(|_| fs::write(&path, &bytes));

    match written {
        Ok(()) => {
            info!("Exported report to {} ({} bytes)", path.display(), bytes.len());
            ExportOutcome::Written(path)
        }
        Err(e) => {
            warn!("Export unavailable: cannot write {}: {}", path.display(), e);
            ExportOutcome::Unavailable {
                reason: format!("cannot write {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QualError;
    use tempfile::TempDir;

    struct FailingRenderer;

    impl DocumentRenderer for FailingRenderer {
        fn render(&self, _: &[RenderBlock], _: &PageGeometry) -> Result<Vec<u8>> {
            Err(QualError::Render("no backend".to_string()))
        }

        fn extension(&self) -> &'static str {
            "pdf"
        }
    }

    fn blocks() -> Vec<RenderBlock> {
        vec![
            RenderBlock::heading("Top Quotes"),
            RenderBlock::paragraph("R1: Q1"),
        ]
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("reports");

        let outcome = export_report(
            &blocks(),
            &PageGeometry::default(),
            &MarkdownRenderer,
            &out,
            "24-017",
        );

        let path = outcome.path().unwrap();
        assert_eq!(path, out.join("24-017_summary.md"));
        assert!(fs::read_to_string(path).unwrap().contains("R1: Q1"));
    }

    #[test]
    fn test_renderer_failure_degrades() {
        let dir = TempDir::new().unwrap();
        let outcome = export_report(
            &blocks(),
            &PageGeometry::default(),
            &FailingRenderer,
            dir.path(),
            "untitled",
        );

        match outcome {
            ExportOutcome::Unavailable { reason } => assert!(reason.contains("no backend")),
            other => panic!("expected Unavailable, got {:?}", other),
        }
        assert!(!dir.path().join("untitled_summary.pdf").exists());
    }

    #[test]
    fn test_unwritable_target_degrades() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let outcome = export_report(
            &blocks(),
            &PageGeometry::default(),
            &HtmlRenderer,
            &blocker.join("reports"),
            "P",
        );
        assert!(matches!(outcome, ExportOutcome::Unavailable { .. }));
    }

    #[test]
    fn test_renderer_for_format() {
        assert_eq!(renderer_for(ExportFormat::Html).extension(), "html");
        assert_eq!(renderer_for(ExportFormat::Markdown).extension(), "md");
    }
}
