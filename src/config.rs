use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL prepended to TMDB image paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Path to the movie id index dataset (JSON array of ids)
    #[serde(default = "default_movie_index_path")]
    pub movie_index_path: String,

    /// Path to the similarity matrix dataset (JSON NxN array)
    #[serde(default = "default_similarity_matrix_path")]
    pub similarity_matrix_path: String,

    /// Number of recommendations returned when the request does not
    /// specify a limit
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_movie_index_path() -> String {
    "data/movie_ids.json".to_string()
}

fn default_similarity_matrix_path() -> String {
    "data/similarity.json".to_string()
}

fn default_recommendation_limit() -> usize {
    8
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
