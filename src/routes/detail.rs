use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult, models::MovieDetail, services::recommender::MovieId, state::AppState,
};

/// Handler for the movie detail endpoint
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<MovieDetail>> {
    let detail = state
        .detail_service
        .movie_detail(id, state.default_limit)
        .await?;
    Ok(Json(detail))
}
