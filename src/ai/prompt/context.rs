//! Prompt header from project context
//!
//! Deterministic and pure: the same context always yields the same header.

use crate::types::ProjectContext;

/// Build the canonical prompt header
///
/// Field order is fixed: project id, client, industry, objectives,
/// respondent type, then one `- <question>` line per question. An empty
/// question list yields an empty bulleted block; callers reject that case
/// before a request is built.
pub fn build_context_header(ctx: &ProjectContext) -> String {
    let questions = ctx
        .questions
        .iter()
        .map(|q| format!("- {}", q))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Project: {} | Client: {} | Industry: {}\n\
         Objectives: {}\n\
         Respondent Type: {}\n\
         Questions:\n\
         {}\n\n",
        ctx.project_id,
        ctx.client_name,
        ctx.industry,
        ctx.objectives,
        ctx.respondent_type,
        questions
    )
}
