//! Project Command
//!
//! Manage stored project contexts.
//!
//! Usage:
//!   qualsum project list
//!   qualsum project show <ID> [-f json]
//!   qualsum project save --id <ID> [--client ..] [--question ..] [--questions-file ..]
//!   qualsum project remove <ID>

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, read_text_file};
use crate::types::{ProjectContext, QualError, Result};

/// Fields for `project save`; the stored context is replaced wholesale
#[derive(Debug, Default)]
pub struct SaveOptions {
    pub id: String,
    pub client: String,
    pub industry: String,
    pub respondent_type: String,
    pub objectives: String,
    pub questions: Vec<String>,
    pub questions_file: Option<PathBuf>,
}

impl SaveOptions {
    fn into_context(self) -> Result<ProjectContext> {
        let mut questions: Vec<String> = self
            .questions
            .iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if let Some(path) = &self.questions_file {
            questions.extend(ProjectContext::parse_questions(&read_text_file(path)?));
        }

        Ok(ProjectContext::new(self.id)
            .with_client(self.client)
            .with_industry(self.industry)
            .with_respondent_type(self.respondent_type)
            .with_objectives(self.objectives)
            .with_questions(questions))
    }
}

pub fn list() -> Result<()> {
    let ctx = CommandContext::load()?;
    let out = Output::new();

    if ctx.store.is_empty() {
        out.info("No saved projects. Use 'qualsum project save' to add one.");
        return Ok(());
    }

    out.header(&format!("Projects ({})", ctx.store.len()));
    for id in ctx.store.ids() {
        if let Some(project) = ctx.store.get(id) {
            println!(
                "  {:<16} {} · {} · {} questions",
                id,
                project.client_name,
                project.industry,
                project.questions.len()
            );
        }
    }
    Ok(())
}

/// Project context sidebar
pub fn show(id: &str, format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let project = ctx.store.require(id)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(project)?);
        return Ok(());
    }

    let out = Output::new();
    out.header(&format!("Project {}", project.project_id));
    out.field("Client", &project.client_name);
    out.field("Industry", &project.industry);
    out.field("Respondent type", &project.respondent_type);
    out.field("Objectives", &project.objectives);

    out.section("Questions");
    if project.questions.is_empty() {
        out.warning("No questions; summaries cannot be generated for this project");
    }
    for question in &project.questions {
        println!("- {}", question);
    }
    Ok(())
}

pub fn save(options: SaveOptions) -> Result<()> {
    let mut ctx = CommandContext::load()?;
    let out = Output::new();

    let project = options.into_context()?;
    if project.questions.is_empty() {
        out.warning("Saving a project without questions");
    }

    let id = project.project_id.trim().to_string();
    let replaced = ctx.store.upsert(project)?;
    ctx.store.save()?;

    if replaced.is_some() {
        out.success(&format!("Updated project {}", id));
    } else {
        out.success(&format!("Saved project {}", id));
    }
    Ok(())
}

pub fn remove(id: &str) -> Result<()> {
    let mut ctx = CommandContext::load()?;

    if ctx.store.remove(id).is_none() {
        return Err(QualError::Storage(format!("Project '{}' not found", id)));
    }
    ctx.store.save()?;

    Output::new().success(&format!("Removed project {}", id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_options_merge_questions() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("guide.txt");
        std::fs::write(&file, "Q2\n\n  Q3  \n").unwrap();

        let project = SaveOptions {
            id: "P-1".to_string(),
            client: "Acme".to_string(),
            questions: vec!["Q1".to_string(), "   ".to_string()],
            questions_file: Some(file),
            ..SaveOptions::default()
        }
        .into_context()
        .unwrap();

        assert_eq!(project.questions, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(project.client_name, "Acme");
    }
}
