/// Movie metadata provider abstraction
///
/// The detail page needs three kinds of metadata per movie: core details,
/// credits, and videos. Putting them behind one trait keeps the aggregation
/// layer independent of TMDB and lets tests substitute a stub provider.
use crate::{
    error::AppResult,
    models::{TmdbCredits, TmdbMovie, TmdbVideos},
    services::recommender::MovieId,
};

pub mod tmdb;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch core movie details (title, release date, poster, genres)
    async fn movie(&self, id: MovieId) -> AppResult<TmdbMovie>;

    /// Fetch cast and crew credits
    async fn credits(&self, id: MovieId) -> AppResult<TmdbCredits>;

    /// Fetch associated videos (trailers, teasers, clips)
    async fn videos(&self, id: MovieId) -> AppResult<TmdbVideos>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
