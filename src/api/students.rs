//! Student endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{error::AppResult, AppState};

use super::{MessageResponse, SavedResponse};

/// List the student of each batch
#[utoipa::path(
    get,
    path = "/borrow/students",
    tag = "students",
    responses(
        (status = 200, description = "Students in batch order", body = Vec<Object>)
    )
)]
pub async fn list_students(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(state.services.borrow.list_students().await)
}

/// Get a student by ID
#[utoipa::path(
    get,
    path = "/borrow/students/{stud_id}",
    tag = "students",
    params(
        ("stud_id" = String, Path, description = "Student ID, matched exactly")
    ),
    responses(
        (status = 200, description = "Student details", body = Object),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(stud_id): Path<String>,
) -> AppResult<Json<Value>> {
    let student = state.services.borrow.get_student(&stud_id).await?;
    Ok(Json(student))
}

/// Set the student of the first batch
#[utoipa::path(
    post,
    path = "/borrow/students",
    tag = "students",
    request_body = Object,
    responses(
        (status = 201, description = "Student saved", body = SavedResponse)
    )
)]
pub async fn save_student(
    State(state): State<AppState>,
    Json(student): Json<Value>,
) -> AppResult<(StatusCode, Json<SavedResponse>)> {
    let data = state.services.borrow.set_student(student).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
            message: "Student saved!".to_string(),
            data,
        }),
    ))
}

/// Remove a student from its batch
#[utoipa::path(
    delete,
    path = "/borrow/students/{stud_id}",
    tag = "students",
    params(
        ("stud_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(stud_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.borrow.delete_student(&stud_id).await?;

    Ok(Json(MessageResponse {
        message: format!("Student {} deleted!", stud_id),
    }))
}
