use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CastMember, MovieDetail, RecommendedMovie, Trailer, TmdbCredits, TmdbVideos},
    services::{
        providers::MetadataProvider,
        recommender::{MovieId, Recommender},
    },
};

/// Cast credits shown on the detail page, most popular first
const MAX_CAST: usize = 6;

/// Aggregates everything a movie detail page needs: metadata, credits and
/// trailers from the provider, plus similar titles from the recommender,
/// each enriched with its own metadata fetch.
pub struct DetailService {
    provider: Arc<dyn MetadataProvider>,
    recommender: Arc<Recommender>,
    image_base_url: String,
}

impl DetailService {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        recommender: Arc<Recommender>,
        image_base_url: String,
    ) -> Self {
        Self {
            provider,
            recommender,
            image_base_url,
        }
    }

    /// Builds the full detail payload for one movie
    pub async fn movie_detail(&self, id: MovieId, limit: usize) -> AppResult<MovieDetail> {
        tracing::info!(movie_id = id, "Building movie detail");

        let movie = self.provider.movie(id).await?;
        let credits = self.provider.credits(id).await?;
        let videos = self.provider.videos(id).await?;

        let similar_ids = self.recommender.recommend(id, limit)?;
        let recommendations = self.enrich_recommendations(similar_ids).await;

        let poster_url = self.image_url(movie.poster_path.as_deref());

        Ok(MovieDetail {
            id: movie.id,
            poster_url,
            genres: movie.genre_names(),
            popularity: format!("{:.1}", movie.popularity),
            directors: directors(&credits),
            cast: self.top_cast(&credits),
            trailers: trailers(&videos),
            recommendations,
            release_date: movie.release_date,
            overview: movie.overview,
            title: movie.title,
        })
    }

    /// Raw ordered recommendation ids, without enrichment
    pub fn similar_movies(&self, id: MovieId, limit: usize) -> AppResult<Vec<MovieId>> {
        Ok(self.recommender.recommend(id, limit)?)
    }

    /// Fetches metadata for each recommended id in parallel, preserving the
    /// similarity ordering. A failed fetch drops that entry rather than
    /// failing the whole page.
    async fn enrich_recommendations(&self, ids: Vec<MovieId>) -> Vec<RecommendedMovie> {
        let mut tasks = Vec::new();

        for movie_id in ids {
            let provider = Arc::clone(&self.provider);
            let task = tokio::spawn(async move { provider.movie(movie_id).await });
            tasks.push((movie_id, task));
        }

        let mut cards = Vec::new();

        for (movie_id, task) in tasks {
            match task.await {
                Ok(Ok(movie)) => {
                    let poster_url = self.image_url(movie.poster_path.as_deref());
                    cards.push(RecommendedMovie {
                        id: movie.id,
                        poster_url,
                        year: movie.release_year(),
                        language: movie.display_language(),
                        genres: movie.genre_names(),
                        title: movie.title,
                    });
                }
                Ok(Err(e)) => {
                    tracing::warn!(movie_id, error = %e, "Skipping recommendation enrichment");
                }
                Err(e) => {
                    tracing::warn!(movie_id, error = %e, "Enrichment task join error");
                }
            }
        }

        cards
    }

    fn top_cast(&self, credits: &TmdbCredits) -> Vec<CastMember> {
        let mut cast = credits.cast.clone();
        cast.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

        cast.into_iter()
            .take(MAX_CAST)
            .map(|member| CastMember {
                profile_url: self.image_url(member.profile_path.as_deref()),
                name: member.name,
            })
            .collect()
    }

    fn image_url(&self, path: Option<&str>) -> Option<String> {
        path.map(|p| format!("{}{}", self.image_base_url, p))
    }
}

fn directors(credits: &TmdbCredits) -> Vec<String> {
    credits
        .crew
        .iter()
        .filter(|member| member.job == "Director")
        .map(|member| member.name.clone())
        .collect()
}

fn trailers(videos: &TmdbVideos) -> Vec<Trailer> {
    videos
        .results
        .iter()
        .filter(|video| {
            video.site.eq_ignore_ascii_case("youtube")
                && video.video_type.eq_ignore_ascii_case("trailer")
        })
        .map(|video| Trailer {
            name: video.name.clone(),
            key: video.key.clone(),
        })
        .collect()
}
