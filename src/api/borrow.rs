//! Borrow transaction endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, MethodRouter},
    Json,
};
use serde_json::Value;

use crate::{error::AppResult, AppState};

use super::{MessageResponse, SavedResponse};

/// Get the current borrow transaction
#[utoipa::path(
    get,
    path = "/borrow",
    tag = "borrow",
    responses(
        (status = 200, description = "Current transaction, `{}` when none is stored", body = Object)
    )
)]
pub async fn get_borrow(State(state): State<AppState>) -> Json<Value> {
    Json(state.services.borrow.get_transaction().await)
}

/// Replace the borrow transaction
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrow",
    request_body = Object,
    responses(
        (status = 201, description = "Transaction saved", body = SavedResponse)
    )
)]
pub async fn save_borrow(
    State(state): State<AppState>,
    Json(transaction): Json<Value>,
) -> AppResult<(StatusCode, Json<SavedResponse>)> {
    let data = state.services.borrow.replace_transaction(transaction).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
            message: "Borrow transaction saved!".to_string(),
            data,
        }),
    ))
}

/// Delete the borrow transaction if its id matches
#[utoipa::path(
    delete,
    path = "/borrow/{id}",
    tag = "borrow",
    params(
        ("id" = String, Path, description = "Borrow transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction deleted", body = MessageResponse),
        (status = 404, description = "Transaction not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_borrow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    remove_transaction(&state, &id).await
}

/// `DELETE /borrow/{segment}` for a segment that is also a collection route
/// (`books`, `students`, `authors`), so the id still reaches the transaction.
pub fn delete_borrow_segment(segment: &'static str) -> MethodRouter<AppState> {
    delete(move |State(state): State<AppState>| async move {
        remove_transaction(&state, segment).await
    })
}

async fn remove_transaction(state: &AppState, id: &str) -> AppResult<Json<MessageResponse>> {
    state.services.borrow.delete_transaction(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Borrow transaction {} deleted!", id),
    }))
}
