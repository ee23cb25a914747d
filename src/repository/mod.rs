//! Repository layer for document storage

pub mod document;

use std::path::PathBuf;
use std::sync::Arc;

pub use document::DocumentStore;

/// Main repository struct holding the loaded document store
#[derive(Clone)]
pub struct Repository {
    pub document: Arc<DocumentStore>,
}

impl Repository {
    /// Load the document stored at `path` and wrap it in a repository
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            document: Arc::new(DocumentStore::load(path).await),
        }
    }
}
