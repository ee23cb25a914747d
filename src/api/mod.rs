//! API handlers for the borrow REST endpoints

pub mod authors;
pub mod books;
pub mod borrow;
pub mod health;
pub mod openapi;
pub mod search;
pub mod students;

use axum::{
    routing::{delete, get},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Confirmation message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Confirmation message with the stored value
#[derive(Serialize, ToSchema)]
pub struct SavedResponse {
    pub message: String,
    /// Value exactly as stored
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Transaction
        .route("/borrow", get(borrow::get_borrow).post(borrow::save_borrow))
        .route("/borrow/:id", delete(borrow::delete_borrow))
        // Books
        .route(
            "/borrow/books",
            get(books::list_books)
                .post(books::add_book)
                .merge(borrow::delete_borrow_segment("books")),
        )
        .route("/borrow/books/:book_id", get(books::get_book).delete(books::delete_book))
        // Students
        .route(
            "/borrow/students",
            get(students::list_students)
                .post(students::save_student)
                .merge(borrow::delete_borrow_segment("students")),
        )
        .route(
            "/borrow/students/:stud_id",
            get(students::get_student).delete(students::delete_student),
        )
        // Authors
        .route(
            "/borrow/authors",
            get(authors::list_authors).merge(borrow::delete_borrow_segment("authors")),
        )
        .route("/borrow/authors/:aut_id", get(authors::get_author))
        // Search
        .route("/search", get(search::search))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
}
