//! Persistence
//!
//! Plain key-value project metadata. Summaries are never persisted.

pub mod project_store;

pub use project_store::ProjectStore;
