//! Prompt Builder System
//!
//! Standardized prompt construction for the summarization request.
//!
//! A summary prompt always has the same four parts in the same order:
//!
//! 1. **Header**: project context and question list ([`build_context_header`])
//! 2. **Instructions**: analyst role and the required sections with counts
//! 3. **Template**: the markup skeleton the reply must mirror ([`SUMMARY_TEMPLATE`])
//! 4. **Raw responses**: the pasted interview answers

mod context;
pub mod template;

pub use context::build_context_header;
pub use template::{SUMMARY_TEMPLATE, tags};

use crate::constants::shape;

/// Prompt section types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSection {
    /// Pre-rendered context header
    Header(String),
    /// Role sentence followed by one `- ` line per requirement
    Instructions {
        role: String,
        requirements: Vec<String>,
        closing: String,
    },
    /// Markup template, emitted verbatim
    Template(String),
    /// Raw responses under a label
    Responses { label: String, content: String },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.sections.push(PromptSection::Header(header.into()));
        self
    }

    pub fn instructions(mut self, role: &str, requirements: Vec<String>, closing: &str) -> Self {
        self.sections.push(PromptSection::Instructions {
            role: role.to_string(),
            requirements,
            closing: closing.to_string(),
        });
        self
    }

    pub fn template(mut self, template: &str) -> Self {
        self.sections
            .push(PromptSection::Template(template.to_string()));
        self
    }

    pub fn responses(mut self, label: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Responses {
            label: label.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Concatenate sections in insertion order
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Header(header) => prompt.push_str(&header),
                PromptSection::Instructions {
                    role,
                    requirements,
                    closing,
                } => {
                    prompt.push_str(&role);
                    prompt.push('\n');
                    for requirement in requirements {
                        prompt.push_str(&format!("- {}\n", requirement));
                    }
                    prompt.push_str(&closing);
                    prompt.push('\n');
                }
                PromptSection::Template(template) => {
                    prompt.push('\n');
                    prompt.push_str(&template);
                    prompt.push('\n');
                }
                PromptSection::Responses { label, content } => {
                    prompt.push_str(&format!("\n{}:\n{}\n", label, content));
                }
            }
        }

        prompt
    }
}

const ANALYST_ROLE: &str = "You are a senior qualitative research analyst and business strategy consultant. Generate exactly:";

const OUTPUT_RULE: &str = "Return only valid XML matching the template below.";

/// Required sections with their counts
fn summary_requirements() -> Vec<String> {
    let (exec_min, exec_max) = shape::EXECUTIVE_ITEMS;
    let (ideas_min, ideas_max) = shape::IDEAS;
    vec![
        format!(
            "Executive Summary: {}–{} bullets, each 2–3 sentences",
            exec_min, exec_max
        ),
        format!(
            "Narrative Summary: at least {} words",
            shape::NARRATIVE_MIN_WORDS
        ),
        format!(
            "Ideas Worth Exploring: {}–{} bullets, each 2–3 sentences",
            ideas_min, ideas_max
        ),
        format!(
            "Top {} Quotes: verbatim with respondent IDs",
            shape::QUOTES
        ),
    ]
}

/// Compose the full summarization prompt
///
/// Order is header, instructions, template, raw responses. Raw responses are
/// passed through untouched; emptiness is checked by the caller.
pub fn compose_summary_prompt(header: &str, raw_responses: &str) -> String {
    PromptBuilder::new()
        .header(header)
        .instructions(ANALYST_ROLE, summary_requirements(), OUTPUT_RULE)
        .template(SUMMARY_TEMPLATE)
        .responses("Raw Responses", raw_responses)
        .build()
}
