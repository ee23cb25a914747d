//! Library borrow server
//!
//! A REST JSON API over a single borrow transaction: batches of books, their
//! authors and the borrowing student, kept in one JSON document on disk.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod search;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Load the document named by the storage configuration and build services over it
    pub async fn load(config: AppConfig) -> Self {
        let repository = Repository::open(config.storage.path.clone()).await;

        Self {
            config: Arc::new(config),
            services: Arc::new(Services::new(repository)),
        }
    }
}
