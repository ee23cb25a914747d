//! Borrow transaction views and edits
//!
//! A transaction is `{ borrow_transactionid, borrow_bookbatch: [Batch] }` where
//! each batch is `{ batch_id, books: [Book], student }`. Accessors flatten the
//! batches into books, students and authors; mutations edit the batches in
//! place. Nothing here touches storage: callers persist after a successful
//! mutation.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use super::value::{is_truthy, loose_eq, strict_eq, to_text};
use crate::error::{AppError, AppResult};

pub const TRANSACTION_ID: &str = "borrow_transactionid";
pub const BATCHES: &str = "borrow_bookbatch";
pub const BOOKS: &str = "books";
pub const STUDENT: &str = "student";
pub const AUTHORS: &str = "authors";
pub const BOOK_ID: &str = "book_id";
pub const STUDENT_ID: &str = "stud_id";
pub const AUTHOR_ID: &str = "aut_id";

/// Batch created when a book or student is added to a transaction without batches
pub fn default_batch() -> Value {
    json!({ "batch_id": 1, BOOKS: [], STUDENT: {} })
}

fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn batches(borrow: &Value) -> &[Value] {
    items(borrow, BATCHES)
}

/// Every book across all batches, in batch order then book order
pub fn all_books(borrow: &Value) -> Vec<&Value> {
    batches(borrow)
        .iter()
        .flat_map(|batch| items(batch, BOOKS))
        .collect()
}

/// First book whose `book_id` loosely equals `id`
pub fn find_book<'a>(borrow: &'a Value, id: &str) -> Option<&'a Value> {
    all_books(borrow)
        .into_iter()
        .find(|book| book.get(BOOK_ID).is_some_and(|v| loose_eq(v, id)))
}

/// The student of each batch that has one, in batch order
pub fn all_students(borrow: &Value) -> Vec<&Value> {
    batches(borrow)
        .iter()
        .filter_map(|batch| batch.get(STUDENT))
        .filter(|student| is_truthy(student))
        .collect()
}

/// First student whose `stud_id` is exactly `id`
pub fn find_student<'a>(borrow: &'a Value, id: &str) -> Option<&'a Value> {
    all_students(borrow)
        .into_iter()
        .find(|student| student.get(STUDENT_ID).is_some_and(|v| strict_eq(v, id)))
}

/// Key under which two authors count as the same person
fn author_key(author: &Value) -> String {
    match author.get(AUTHOR_ID) {
        Some(id) if !id.is_null() => to_text(id),
        _ => author.to_string(),
    }
}

/// Authors of every book, deduplicated by `aut_id` (or by their whole value
/// when they have none). The first occurrence wins and keeps its position.
pub fn all_authors(borrow: &Value) -> Vec<&Value> {
    let mut unique: IndexMap<String, &Value> = IndexMap::new();
    for author in all_books(borrow).into_iter().flat_map(|book| items(book, AUTHORS)) {
        unique.entry(author_key(author)).or_insert(author);
    }
    unique.into_values().collect()
}

/// First deduplicated author whose `aut_id` loosely equals `id`
pub fn find_author<'a>(borrow: &'a Value, id: &str) -> Option<&'a Value> {
    all_authors(borrow)
        .into_iter()
        .find(|author| author.get(AUTHOR_ID).is_some_and(|v| loose_eq(v, id)))
}

/// Clear the transaction if its id is exactly `id`.
///
/// Returns `false`, leaving the transaction untouched, when the id differs.
pub fn delete_transaction(borrow: &mut Value, id: &str) -> bool {
    let matches = borrow.get(TRANSACTION_ID).is_some_and(|v| strict_eq(v, id));
    if matches {
        *borrow = json!({});
    }
    matches
}

/// First batch of the transaction, created when there is none
fn first_batch(borrow: &mut Value) -> AppResult<&mut Map<String, Value>> {
    let transaction = borrow
        .as_object_mut()
        .ok_or_else(|| AppError::Internal("borrow transaction is not an object".to_string()))?;

    let batches = transaction.entry(BATCHES).or_insert(Value::Null);
    if batches.as_array().map_or(true, Vec::is_empty) {
        *batches = json!([default_batch()]);
    }

    batches[0]
        .as_object_mut()
        .ok_or_else(|| AppError::Internal("first book batch is not an object".to_string()))
}

/// Append a book to the first batch
pub fn add_book(borrow: &mut Value, book: Value) -> AppResult<()> {
    let batch = first_batch(borrow)?;
    let books = batch.entry(BOOKS).or_insert(Value::Null);
    match books {
        Value::Array(books) => books.push(book),
        other => *other = Value::Array(vec![book]),
    }
    Ok(())
}

/// Remove the first book, across batches, whose `book_id` loosely equals `id`
pub fn delete_book(borrow: &mut Value, id: &str) -> Option<Value> {
    let batches = borrow.get_mut(BATCHES)?.as_array_mut()?;
    batches.iter_mut().find_map(|batch| {
        let books = batch.get_mut(BOOKS)?.as_array_mut()?;
        let index = books
            .iter()
            .position(|book| book.get(BOOK_ID).is_some_and(|v| loose_eq(v, id)))?;
        Some(books.remove(index))
    })
}

/// Assign the student of the first batch, replacing any existing one
pub fn set_student(borrow: &mut Value, student: Value) -> AppResult<()> {
    let batch = first_batch(borrow)?;
    batch.insert(STUDENT.to_string(), student);
    Ok(())
}

/// Null out the first batch student whose `stud_id` is exactly `id`
pub fn delete_student(borrow: &mut Value, id: &str) -> Option<Value> {
    let batches = borrow.get_mut(BATCHES)?.as_array_mut()?;
    batches.iter_mut().find_map(|batch| {
        let student = batch.get_mut(STUDENT)?;
        let matches = is_truthy(student) && student.get(STUDENT_ID).is_some_and(|v| strict_eq(v, id));
        matches.then(|| student.take())
    })
}
