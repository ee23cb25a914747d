//! Deep search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, search::SearchHit, AppState};

#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Text to look for in keys and values, case-insensitive
    pub q: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// Search ids, names and values across the whole document
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Every matching node, parents before descendants", body = SearchResponse),
        (status = 400, description = "Missing or blank query", body = crate::error::ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let query = params.q.unwrap_or_default();
    let results = state.services.search.search(&query).await?;

    Ok(Json(SearchResponse {
        query,
        count: results.len(),
        results,
    }))
}
