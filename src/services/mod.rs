//! Business logic services

pub mod borrow;
pub mod search;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub borrow: borrow::BorrowService,
    pub search: search::SearchService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            borrow: borrow::BorrowService::new(repository.clone()),
            search: search::SearchService::new(repository),
        }
    }
}
