//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{error::AppResult, AppState};

use super::{MessageResponse, SavedResponse};

/// List books across all batches
#[utoipa::path(
    get,
    path = "/borrow/books",
    tag = "books",
    responses(
        (status = 200, description = "Books in batch order", body = Vec<Object>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(state.services.borrow.list_books().await)
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/borrow/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID, `7` also matches a numeric id")
    ),
    responses(
        (status = 200, description = "Book details", body = Object),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<Value>> {
    let book = state.services.borrow.get_book(&book_id).await?;
    Ok(Json(book))
}

/// Add a book to the first batch
#[utoipa::path(
    post,
    path = "/borrow/books",
    tag = "books",
    request_body = Object,
    responses(
        (status = 201, description = "Book added", body = SavedResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    Json(book): Json<Value>,
) -> AppResult<(StatusCode, Json<SavedResponse>)> {
    let data = state.services.borrow.add_book(book).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
            message: "Book added!".to_string(),
            data,
        }),
    ))
}

/// Delete the first book with the given ID
#[utoipa::path(
    delete,
    path = "/borrow/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.borrow.delete_book(&book_id).await?;

    Ok(Json(MessageResponse {
        message: format!("Book {} deleted!", book_id),
    }))
}
