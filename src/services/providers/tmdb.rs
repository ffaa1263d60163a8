/// TMDB API provider
///
/// Thin client over the themoviedb.org v3 REST API. Authentication is an
/// `api_key` query parameter on every request; all endpoints used here are
/// keyed by the TMDB movie id, which is the same id space as the similarity
/// index.
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{TmdbCredits, TmdbMovie, TmdbVideos},
    services::{providers::MetadataProvider, recommender::MovieId},
};

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                tracing::error!(path = %path, "TMDB rejected the API key");
                return Err(AppError::ExternalApi(
                    "TMDB rejected the configured API key".to_string(),
                ));
            }
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!(
                    "TMDB has no resource at {}",
                    path
                )));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalApi(format!(
                    "TMDB API returned status {}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn movie(&self, id: MovieId) -> AppResult<TmdbMovie> {
        let movie: TmdbMovie = self.get_json(&format!("/movie/{}", id)).await?;

        tracing::debug!(
            movie_id = id,
            title = %movie.title,
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(movie)
    }

    async fn credits(&self, id: MovieId) -> AppResult<TmdbCredits> {
        let credits: TmdbCredits = self.get_json(&format!("/movie/{}/credits", id)).await?;

        tracing::debug!(
            movie_id = id,
            cast = credits.cast.len(),
            crew = credits.crew.len(),
            provider = "tmdb",
            "Credits fetched"
        );

        Ok(credits)
    }

    async fn videos(&self, id: MovieId) -> AppResult<TmdbVideos> {
        let videos: TmdbVideos = self.get_json(&format!("/movie/{}/videos", id)).await?;

        tracing::debug!(
            movie_id = id,
            videos = videos.results.len(),
            provider = "tmdb",
            "Videos fetched"
        );

        Ok(videos)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
