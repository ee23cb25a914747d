//! Author endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{error::AppResult, AppState};

/// List distinct authors of all borrowed books
#[utoipa::path(
    get,
    path = "/borrow/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Authors in first-seen order", body = Vec<Object>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(state.services.borrow.list_authors().await)
}

/// Get an author by ID
#[utoipa::path(
    get,
    path = "/borrow/authors/{aut_id}",
    tag = "authors",
    params(
        ("aut_id" = String, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = Object),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(aut_id): Path<String>,
) -> AppResult<Json<Value>> {
    let author = state.services.borrow.get_author(&aut_id).await?;
    Ok(Json(author))
}
