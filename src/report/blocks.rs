//! Ordered block projection for paginated export
//!
//! [`assemble_blocks`] is a pure function: no parsing, no validation and no
//! clock reads. The generation timestamp comes in as a parameter so two
//! calls with the same inputs produce identical sequences.

use chrono::NaiveDateTime;
use std::path::PathBuf;

use super::headings;
use super::logo::LogoRef;
use crate::constants::report;
use crate::types::{ProjectContext, SummaryDocument};

/// Renderer-agnostic unit of paginated content
#[derive(Debug, Clone, PartialEq)]
pub enum RenderBlock {
    Heading(String),
    Paragraph(String),
    Image {
        path: PathBuf,
        width_mm: f32,
        height_mm: f32,
    },
    PageBreak,
}

impl RenderBlock {
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading(text.into())
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(text.into())
    }

    fn bullet(text: &str) -> Self {
        Self::Paragraph(format!("- {}", text))
    }
}

/// "Project {id} | Client: {client} | Industry: {industry} | Generated: {ts}"
pub fn metadata_line(ctx: &ProjectContext, generated_at: &NaiveDateTime) -> String {
    format!(
        "Project {} | Client: {} | Industry: {} | Generated: {}",
        ctx.project_id,
        ctx.client_name,
        ctx.industry,
        generated_at.format(report::TIMESTAMP_FORMAT)
    )
}

/// Project a summary and its context into export blocks
pub fn assemble_blocks(
    doc: &SummaryDocument,
    ctx: &ProjectContext,
    logo: Option<&LogoRef>,
    generated_at: &NaiveDateTime,
) -> Vec<RenderBlock> {
    let mut blocks = Vec::with_capacity(
        12 + ctx.questions.len() + doc.executive_items.len() + doc.ideas.len() + doc.quotes.len(),
    );

    if let Some(logo) = logo {
        blocks.push(RenderBlock::Image {
            path: logo.path.clone(),
            width_mm: logo.width_mm,
            height_mm: logo.height_mm,
        });
    }

    blocks.push(RenderBlock::paragraph(metadata_line(ctx, generated_at)));

    blocks.push(RenderBlock::heading(headings::QUESTIONS));
    blocks.extend(ctx.questions.iter().map(|q| RenderBlock::bullet(q)));
    blocks.push(RenderBlock::PageBreak);

    blocks.push(RenderBlock::heading(headings::EXECUTIVE));
    blocks.extend(doc.executive_items.iter().map(|item| RenderBlock::bullet(item)));
    blocks.push(RenderBlock::PageBreak);

    blocks.push(RenderBlock::heading(headings::NARRATIVE));
    blocks.push(RenderBlock::paragraph(doc.narrative.as_str()));
    blocks.push(RenderBlock::PageBreak);

    blocks.push(RenderBlock::heading(headings::IDEAS));
    blocks.extend(doc.ideas.iter().map(|idea| RenderBlock::bullet(idea)));
    blocks.push(RenderBlock::PageBreak);

    blocks.push(RenderBlock::heading(headings::QUOTES));
    blocks.extend(doc.quotes.iter().map(|q| RenderBlock::paragraph(q.display())));

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quote;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, 5, 0)
            .unwrap()
    }

    fn ctx() -> ProjectContext {
        ProjectContext::new("24-017")
            .with_client("Acme")
            .with_industry("Telecom")
            .with_questions(["Why switch?", "What next?"])
    }

    fn doc() -> SummaryDocument {
        SummaryDocument {
            executive_items: vec!["A".into(), "B".into()],
            narrative: "N".into(),
            ideas: vec!["I".into()],
            quotes: vec![Quote::new("R1", "Q1")],
        }
    }

    #[test]
    fn test_block_order() {
        let blocks = assemble_blocks(&doc(), &ctx(), None, &at(9));
        let expected = vec![
            RenderBlock::paragraph(
                "Project 24-017 | Client: Acme | Industry: Telecom | Generated: 2025-03-14 09:05",
            ),
            RenderBlock::heading("Questions"),
            RenderBlock::paragraph("- Why switch?"),
            RenderBlock::paragraph("- What next?"),
            RenderBlock::PageBreak,
            RenderBlock::heading("Executive Summary"),
            RenderBlock::paragraph("- A"),
            RenderBlock::paragraph("- B"),
            RenderBlock::PageBreak,
            RenderBlock::heading("Narrative Summary"),
            RenderBlock::paragraph("N"),
            RenderBlock::PageBreak,
            RenderBlock::heading("Ideas Worth Exploring"),
            RenderBlock::paragraph("- I"),
            RenderBlock::PageBreak,
            RenderBlock::heading("Top Quotes"),
            RenderBlock::paragraph("R1: Q1"),
        ];
        assert_eq!(blocks, expected);
    }

    #[test]
    fn test_logo_prepended() {
        let logo = LogoRef {
            path: PathBuf::from("logo.png"),
            width_mm: 40.0,
            height_mm: 12.0,
        };
        let blocks = assemble_blocks(&doc(), &ctx(), Some(&logo), &at(9));
        assert_eq!(
            blocks[0],
            RenderBlock::Image {
                path: PathBuf::from("logo.png"),
                width_mm: 40.0,
                height_mm: 12.0,
            }
        );
        assert!(matches!(blocks[1], RenderBlock::Paragraph(_)));
    }

    #[test]
    fn test_idempotent_apart_from_timestamp() {
        let first = assemble_blocks(&doc(), &ctx(), None, &at(9));
        let second = assemble_blocks(&doc(), &ctx(), None, &at(9));
        assert_eq!(first, second);

        let later = assemble_blocks(&doc(), &ctx(), None, &at(17));
        assert_ne!(first[0], later[0]);
        assert_eq!(first[1..], later[1..]);
    }

    #[test]
    fn test_empty_sections_keep_headings() {
        let blocks = assemble_blocks(
            &SummaryDocument::default(),
            &ProjectContext::new("P"),
            None,
            &at(9),
        );
        let headings = blocks
            .iter()
            .filter(|b| matches!(b, RenderBlock::Heading(_)))
            .count();
        let breaks = blocks
            .iter()
            .filter(|b| matches!(b, RenderBlock::PageBreak))
            .count();
        assert_eq!(headings, 5);
        assert_eq!(breaks, 4);
        assert!(blocks.contains(&RenderBlock::paragraph("")));
    }
}
