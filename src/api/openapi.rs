//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, borrow, health, search, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Borrow API",
        version = "1.0.0",
        description = "Borrow transaction REST API over a single JSON document",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Transaction
        borrow::get_borrow,
        borrow::save_borrow,
        borrow::delete_borrow,
        // Books
        books::list_books,
        books::get_book,
        books::add_book,
        books::delete_book,
        // Students
        students::list_students,
        students::get_student,
        students::save_student,
        students::delete_student,
        // Authors
        authors::list_authors,
        authors::get_author,
        // Search
        search::search,
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::SavedResponse,
            search::SearchResponse,
            crate::search::SearchHit,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "borrow", description = "Borrow transaction"),
        (name = "books", description = "Borrowed books"),
        (name = "students", description = "Borrowing students"),
        (name = "authors", description = "Authors of borrowed books"),
        (name = "search", description = "Deep search")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
