//! Project-level type definitions
//!
//! Contains the research project context that frames every summary run.

use serde::{Deserialize, Serialize};

/// Research project metadata and interview guide
///
/// Identity key is `project_id`. An empty id denotes an unsaved, ephemeral
/// context that can be summarized but never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectContext {
    #[serde(alias = "project_no")]
    pub project_id: String,
    pub client_name: String,
    pub industry: String,
    #[serde(alias = "resp_type")]
    pub respondent_type: String,
    pub objectives: String,
    /// Interview questions in guide order
    pub questions: Vec<String>,
}

impl ProjectContext {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_respondent_type(mut self, respondent_type: impl Into<String>) -> Self {
        self.respondent_type = respondent_type.into();
        self
    }

    pub fn with_objectives(mut self, objectives: impl Into<String>) -> Self {
        self.objectives = objectives.into();
        self
    }

    pub fn with_questions<I, S>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.questions = questions.into_iter().map(Into::into).collect();
        self
    }

    /// Unsaved context (no identity key)
    pub fn is_ephemeral(&self) -> bool {
        self.project_id.trim().is_empty()
    }

    /// Split "one question per line" input, dropping blank lines
    pub fn parse_questions(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(String::from)
            .collect()
    }

    /// Label used for output file names
    pub fn file_stem(&self) -> String {
        let id = self.project_id.trim();
        if id.is_empty() {
            return "untitled".to_string();
        }
        id.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions_drops_blank_lines() {
        let questions = ProjectContext::parse_questions("  What works?\n\n \nWhat hurts?  \n");
        assert_eq!(questions, vec!["What works?", "What hurts?"]);
    }

    #[test]
    fn test_ephemeral_context() {
        assert!(ProjectContext::default().is_ephemeral());
        assert!(ProjectContext::new("   ").is_ephemeral());
        assert!(!ProjectContext::new("P-101").is_ephemeral());
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{"project_no": "24-017", "client_name": "Acme", "resp_type": "IT buyers",
                       "industry": "Telecom", "objectives": "Churn drivers", "questions": ["Why?"]}"#;
        let ctx: ProjectContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.project_id, "24-017");
        assert_eq!(ctx.respondent_type, "IT buyers");
        assert_eq!(ctx.questions, vec!["Why?"]);
    }

    #[test]
    fn test_file_stem_sanitizes_id() {
        assert_eq!(ProjectContext::new("24/017 A").file_stem(), "24_017_A");
        assert_eq!(ProjectContext::default().file_stem(), "untitled");
    }
}
