//! Borrow transaction service

use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{borrow, document},
    repository::{DocumentStore, Repository},
};

static NO_TRANSACTION: Value = Value::Null;

#[derive(Clone)]
pub struct BorrowService {
    repository: Repository,
}

impl BorrowService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Document store backing the transaction
    pub fn store(&self) -> &DocumentStore {
        &self.repository.document
    }

    async fn read<T>(&self, view: impl FnOnce(&Value) -> T) -> T {
        self.repository
            .document
            .read(|root| view(document::borrow(root).unwrap_or(&NO_TRANSACTION)))
            .await
    }

    async fn mutate<T>(&self, edit: impl FnOnce(&mut Value) -> AppResult<T>) -> AppResult<T> {
        self.repository
            .document
            .mutate(|root| edit(document::borrow_mut(root)))
            .await
    }

    /// Get the current transaction
    pub async fn get_transaction(&self) -> Value {
        self.read(|transaction| {
            if transaction.is_null() {
                json!({})
            } else {
                transaction.clone()
            }
        })
        .await
    }

    /// Replace the whole transaction with `transaction`; `null` stores `{}`
    pub async fn replace_transaction(&self, transaction: Value) -> AppResult<Value> {
        let transaction = if transaction.is_null() { json!({}) } else { transaction };
        let stored = transaction.clone();
        self.mutate(|current| {
            *current = transaction;
            Ok(())
        })
        .await?;
        tracing::info!("Borrow transaction replaced");
        Ok(stored)
    }

    /// Clear the transaction when its id is `id`
    pub async fn delete_transaction(&self, id: &str) -> AppResult<()> {
        self.mutate(|current| {
            if borrow::delete_transaction(current, id) {
                Ok(())
            } else {
                Err(AppError::NotFound("Transaction not found".to_string()))
            }
        })
        .await?;
        tracing::info!(id, "Borrow transaction deleted");
        Ok(())
    }

    /// List books of all batches
    pub async fn list_books(&self) -> Vec<Value> {
        self.read(|transaction| borrow::all_books(transaction).into_iter().cloned().collect())
            .await
    }

    /// Get a book by id
    pub async fn get_book(&self, id: &str) -> AppResult<Value> {
        self.read(|transaction| borrow::find_book(transaction, id).cloned())
            .await
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Append a book to the first batch
    pub async fn add_book(&self, book: Value) -> AppResult<Value> {
        let stored = book.clone();
        self.mutate(|current| borrow::add_book(current, book)).await?;
        tracing::info!("Book added");
        Ok(stored)
    }

    /// Remove the first book with the given id
    pub async fn delete_book(&self, id: &str) -> AppResult<Value> {
        let removed = self
            .mutate(|current| {
                borrow::delete_book(current, id)
                    .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
            })
            .await?;
        tracing::info!(id, "Book deleted");
        Ok(removed)
    }

    /// List the student of every batch that has one
    pub async fn list_students(&self) -> Vec<Value> {
        self.read(|transaction| borrow::all_students(transaction).into_iter().cloned().collect())
            .await
    }

    /// Get a student by id
    pub async fn get_student(&self, id: &str) -> AppResult<Value> {
        self.read(|transaction| borrow::find_student(transaction, id).cloned())
            .await
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// Set the student of the first batch
    pub async fn set_student(&self, student: Value) -> AppResult<Value> {
        let stored = student.clone();
        self.mutate(|current| borrow::set_student(current, student)).await?;
        tracing::info!("Student saved");
        Ok(stored)
    }

    /// Remove the first student with the given id from its batch
    pub async fn delete_student(&self, id: &str) -> AppResult<Value> {
        let removed = self
            .mutate(|current| {
                borrow::delete_student(current, id)
                    .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
            })
            .await?;
        tracing::info!(id, "Student deleted");
        Ok(removed)
    }

    /// List distinct authors of all books
    pub async fn list_authors(&self) -> Vec<Value> {
        self.read(|transaction| borrow::all_authors(transaction).into_iter().cloned().collect())
            .await
    }

    /// Get an author by id
    pub async fn get_author(&self, id: &str) -> AppResult<Value> {
        self.read(|transaction| borrow::find_author(transaction, id).cloned())
            .await
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }
}
