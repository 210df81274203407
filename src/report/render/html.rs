//! Print-ready paged HTML
//!
//! Page geometry maps to an `@page` rule and page breaks to
//! `break-after: page`, so printing from a browser yields the paginated
//! document. Images are embedded as data URIs to keep the file standalone.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use quick_xml::escape::escape;

use super::{DocumentRenderer, PageGeometry};
use crate::report::blocks::RenderBlock;
use crate::types::{QualError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn data_uri(path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| {
            QualError::Render(format!("cannot read image {}: {}", path.display(), e))
        })?;
        let mime = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .map_err(|e| {
                QualError::Render(format!("unknown image format {}: {}", path.display(), e))
            })?;
        Ok(format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(&bytes)))
    }

    fn style(geometry: &PageGeometry) -> String {
        format!(
            "@page {{ size: {}; margin: {}mm; }}\n\
             body {{ font-family: Helvetica, Arial, sans-serif; font-size: 10pt; line-height: 1.4; }}\n\
             h2 {{ font-size: 14pt; margin: 0 0 4mm 0; }}\n\
             p {{ margin: 0 0 2mm 0; white-space: pre-wrap; }}\n\
             .page-break {{ break-after: page; page-break-after: always; }}\n",
            geometry.page_size.css_name(),
            geometry.margin_mm
        )
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, blocks: &[RenderBlock], geometry: &PageGeometry) -> Result<Vec<u8>> {
        let title = blocks
            .iter()
            .find_map(|block| match block {
                RenderBlock::Paragraph(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or("Summary");

        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape(title));
        let _ = writeln!(out, "<style>\n{}</style>", Self::style(geometry));
        out.push_str("</head>\n<body>\n");

        for block in blocks {
            match block {
                RenderBlock::Heading(text) => {
                    let _ = writeln!(out, "<h2>{}</h2>", escape(text.as_str()));
                }
                RenderBlock::Paragraph(text) => {
                    let _ = writeln!(out, "<p>{}</p>", escape(text.as_str()));
                }
                RenderBlock::Image {
                    path,
                    width_mm,
                    height_mm,
                } => {
                    let _ = writeln!(
                        out,
                        "<img src=\"{}\" alt=\"\" style=\"width: {}mm; height: {}mm;\">",
                        Self::data_uri(path)?,
                        width_mm,
                        height_mm
                    );
                }
                RenderBlock::PageBreak => out.push_str("<div class=\"page-break\"></div>\n"),
            }
        }

        out.push_str("</body>\n</html>\n");
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}
