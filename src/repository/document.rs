//! Whole-document JSON storage
//!
//! The store owns the single in-memory library document and mirrors it to one
//! JSON file. Every access goes through the store's lock, and a mutation holds
//! it until the new document is on disk, so handlers never observe each
//! other's partial edits.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    error::AppResult,
    models::document::{ensure_skeleton, skeleton},
};

pub struct DocumentStore {
    path: PathBuf,
    document: Mutex<Value>,
    persisted: AtomicBool,
}

impl DocumentStore {
    /// Load the document from `path`.
    ///
    /// A missing or unreadable file yields the empty skeleton; the failure is
    /// logged and startup continues.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = match read_document(&path).await {
            Ok(mut document) => {
                if ensure_skeleton(&mut document) {
                    tracing::warn!("Document {} had no borrow record, using an empty one", path.display());
                }
                tracing::info!("Loaded document from {}", path.display());
                document
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                skeleton()
            }
        };

        Self {
            path,
            document: Mutex::new(document),
            persisted: AtomicBool::new(true),
        }
    }

    /// Whether the most recent write reached the backing file
    pub fn is_persisted(&self) -> bool {
        self.persisted.load(Ordering::Relaxed)
    }

    /// Run a read-only view over the document
    pub async fn read<T>(&self, view: impl FnOnce(&Value) -> T) -> T {
        let document = self.document.lock().await;
        view(&document)
    }

    /// Apply `edit` to the document, persisting only when it succeeds.
    ///
    /// A failed write is logged and does not undo the in-memory edit.
    pub async fn mutate<T>(&self, edit: impl FnOnce(&mut Value) -> AppResult<T>) -> AppResult<T> {
        let mut document = self.document.lock().await;
        let output = edit(&mut document)?;
        self.persist(&document).await;
        Ok(output)
    }

    async fn persist(&self, document: &Value) {
        match write_document(&self.path, document).await {
            Ok(()) => {
                tracing::debug!("Persisted document to {}", self.path.display());
                self.persisted.store(true, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("Failed to write {}: {}", self.path.display(), e);
                self.persisted.store(false, Ordering::Relaxed);
            }
        }
    }
}

async fn read_document(path: &Path) -> AppResult<Value> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

async fn write_document(path: &Path, document: &Value) -> AppResult<()> {
    let raw = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}
