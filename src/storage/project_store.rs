//! Project Store
//!
//! Flat `project_id → ProjectContext` map persisted as one JSON file.
//! Loaded whole on open, written whole on save. There is no locking:
//! concurrent writers race and the last save wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::types::{ProjectContext, QualError, Result, ResultExt, ValidationError};

pub struct ProjectStore {
    path: PathBuf,
    projects: BTreeMap<String, ProjectContext>,
}

impl ProjectStore {
    /// Load the store at `path`; a missing file yields an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let projects = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str::<BTreeMap<String, ProjectContext>>(&content)
                    .with_context(format!("Invalid project store {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        debug!(
            "Opened project store {} ({} projects)",
            path.display(),
            projects.len()
        );

        Ok(Self { path, projects })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored ids in ascending order
    pub fn ids(&self) -> Vec<&str> {
        self.projects.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProjectContext> {
        self.projects.get(id.trim())
    }

    /// Fetch a project or fail with a storage error naming the id
    pub fn require(&self, id: &str) -> Result<&ProjectContext> {
        self.get(id).ok_or_else(|| {
            QualError::Storage(format!(
                "Project '{}' not found in {}",
                id,
                self.path.display()
            ))
        })
    }

    /// Insert or replace a project wholesale; returns the previous entry
    pub fn upsert(&mut self, mut ctx: ProjectContext) -> Result<Option<ProjectContext>> {
        if ctx.is_ephemeral() {
            return Err(ValidationError::missing_project_id().into());
        }
        ctx.project_id = ctx.project_id.trim().to_string();
        Ok(self.projects.insert(ctx.project_id.clone(), ctx))
    }

    pub fn remove(&mut self, id: &str) -> Option<ProjectContext> {
        self.projects.remove(id.trim())
    }

    /// Overwrite the backing file with the full map
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.projects)?;
        fs::write(&self.path, json)?;

        info!(
            "Saved {} projects to {}",
            self.projects.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationErrorKind;
    use tempfile::TempDir;

    fn sample(id: &str) -> ProjectContext {
        ProjectContext::new(id)
            .with_client("Acme")
            .with_industry("Telecom")
            .with_questions(["Why did you switch?"])
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::open(dir.path().join("projects.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.get("P-1").is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("projects.json");

        let mut store = ProjectStore::open(&path).unwrap();
        store.upsert(sample("P-2")).unwrap();
        store.upsert(sample("P-1")).unwrap();
        store.save().unwrap();

        let reloaded = ProjectStore::open(&path).unwrap();
        assert_eq!(reloaded.ids(), vec!["P-1", "P-2"]);
        assert_eq!(reloaded.get("P-2"), Some(&sample("P-2")));
    }

    #[test]
    fn test_upsert_replaces_wholesale() {
        let dir = TempDir::new().unwrap();
        let mut store = ProjectStore::open(dir.path().join("p.json")).unwrap();

        store.upsert(sample("P-1")).unwrap();
        let previous = store
            .upsert(ProjectContext::new("P-1").with_client("Globex"))
            .unwrap();

        assert_eq!(previous.unwrap().client_name, "Acme");
        let current = store.get("P-1").unwrap();
        assert_eq!(current.client_name, "Globex");
        assert!(current.questions.is_empty());
    }

    #[test]
    fn test_upsert_rejects_empty_id() {
        let dir = TempDir::new().unwrap();
        let mut store = ProjectStore::open(dir.path().join("p.json")).unwrap();

        match store.upsert(ProjectContext::new("  ")) {
            Err(QualError::InputValidation(err)) => {
                assert_eq!(err.kind, ValidationErrorKind::MissingProjectId)
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_remove_and_require() {
        let dir = TempDir::new().unwrap();
        let mut store = ProjectStore::open(dir.path().join("p.json")).unwrap();
        store.upsert(sample("P-1")).unwrap();

        assert!(store.require("P-1").is_ok());
        assert!(store.remove("P-1").is_some());
        assert!(matches!(store.require("P-1"), Err(QualError::Storage(_))));
    }

    #[test]
    fn test_malformed_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ProjectStore::open(&path),
            Err(QualError::Storage(_))
        ));
    }

    #[test]
    fn test_legacy_store_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(
            &path,
            r#"{"24-017": {"project_no": "24-017", "client_name": "Acme", "resp_type": "CFOs",
                 "industry": "Banking", "objectives": "Pricing", "questions": ["Q1", "Q2"]}}"#,
        )
        .unwrap();

        let store = ProjectStore::open(&path).unwrap();
        let ctx = store.get("24-017").unwrap();
        assert_eq!(ctx.respondent_type, "CFOs");
        assert_eq!(ctx.questions.len(), 2);
    }
}
