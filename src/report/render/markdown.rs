//! Markdown export
//!
//! Page geometry has no Markdown equivalent and is ignored; page breaks
//! become thematic breaks.

use super::{DocumentRenderer, PageGeometry};
use crate::report::blocks::RenderBlock;
use crate::types::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl DocumentRenderer for MarkdownRenderer {
    fn render(&self, blocks: &[RenderBlock], _geometry: &PageGeometry) -> Result<Vec<u8>> {
        let mut out = String::new();
        let mut previous_bullet = false;

        for block in blocks {
            let bullet = matches!(block, RenderBlock::Paragraph(text) if text.starts_with("- "));
            // Keep consecutive bullets in one tight list
            if !out.is_empty() {
                out.push_str(if bullet && previous_bullet { "\n" } else { "\n\n" });
            }

            match block {
                RenderBlock::Heading(text) => {
                    out.push_str("## ");
                    out.push_str(text);
                }
                RenderBlock::Paragraph(text) => out.push_str(text),
                RenderBlock::Image { path, .. } => {
                    out.push_str(&format!("![logo]({})", path.display()));
                }
                RenderBlock::PageBreak => out.push_str("---"),
            }
            previous_bullet = bullet;
        }

        out.push('\n');
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_layout() {
        let blocks = [
            RenderBlock::paragraph("Project P | Client: C | Industry: I | Generated: 2025-01-01 10:00"),
            RenderBlock::heading("Executive Summary"),
            RenderBlock::paragraph("- A"),
            RenderBlock::paragraph("- B"),
            RenderBlock::PageBreak,
            RenderBlock::heading("Top Quotes"),
            RenderBlock::paragraph("R1: Q1"),
        ];
        let bytes = MarkdownRenderer
            .render(&blocks, &PageGeometry::default())
            .unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Project P | Client: C | Industry: I | Generated: 2025-01-01 10:00\n\n\
             ## Executive Summary\n\n- A\n- B\n\n---\n\n## Top Quotes\n\nR1: Q1\n"
        );
    }
}
