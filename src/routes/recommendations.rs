use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::AppResult, services::recommender::MovieId, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    limit: Option<usize>,
}

/// Handler for the raw similar-movie id endpoint
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<MovieId>>> {
    let limit = params.limit.unwrap_or(state.default_limit);
    let ids = state.detail_service.similar_movies(id, limit)?;
    Ok(Json(ids))
}
