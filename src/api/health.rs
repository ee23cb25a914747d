//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready`, or `degraded` when the last write to storage failed
    pub status: String,
    pub version: String,
    /// Backing JSON file
    pub storage_path: String,
    /// Whether the in-memory document matches the backing file
    pub persisted: bool,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint (reports the state of the backing file)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Storage status", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let persisted = state.services.borrow.store().is_persisted();

    Json(ReadinessResponse {
        status: if persisted { "ready" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage_path: state.config.storage.path.display().to_string(),
        persisted,
    })
}
