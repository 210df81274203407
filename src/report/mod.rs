//! Document Assembly
//!
//! Projects an extracted [`SummaryDocument`](crate::types::SummaryDocument)
//! into its output forms:
//!
//! - [`SectionTexts`]: flat strings for display and copying
//! - [`assemble_blocks`]: ordered [`RenderBlock`]s for paginated export
//! - [`render`]: renderers that turn blocks into files

pub mod blocks;
pub mod logo;
pub mod render;
pub mod sections;

pub use blocks::{RenderBlock, assemble_blocks, metadata_line};
pub use logo::{LogoRef, resolve_logo};
pub use render::{
    DocumentRenderer, ExportOutcome, HtmlRenderer, MarkdownRenderer, PageGeometry, export_report,
    renderer_for,
};
pub use sections::SectionTexts;

/// Section headings shared by copy text and export
pub mod headings {
    pub const QUESTIONS: &str = "Questions";
    pub const EXECUTIVE: &str = "Executive Summary";
    pub const NARRATIVE: &str = "Narrative Summary";
    pub const IDEAS: &str = "Ideas Worth Exploring";
    pub const QUOTES: &str = "Top Quotes";
}
