//! Deep search service

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
    search::{self, SearchHit},
};

#[derive(Clone)]
pub struct SearchService {
    repository: Repository,
}

impl SearchService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search the whole document, wrapper key included
    pub async fn search(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(AppError::BadRequest("Provide a query via ?q=".to_string()));
        }

        let hits = self
            .repository
            .document
            .read(|root| search::collect(root, query, &[]))
            .await;
        tracing::debug!(query, count = hits.len(), "Search completed");
        Ok(hits)
    }
}
