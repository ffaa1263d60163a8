use serde::{Deserialize, Serialize};

use crate::services::recommender::MovieId;

/// Full detail payload for one movie, as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
    /// Popularity score formatted to one decimal place
    pub popularity: String,
    pub directors: Vec<String>,
    pub cast: Vec<CastMember>,
    pub trailers: Vec<Trailer>,
    pub recommendations: Vec<RecommendedMovie>,
}

/// A single cast credit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub profile_url: Option<String>,
}

/// A YouTube trailer reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trailer {
    pub name: String,
    /// YouTube video key
    pub key: String,
}

/// A recommended title with enough metadata to render a card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub year: Option<String>,
    pub language: Option<String>,
    pub genres: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub original_language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

/// Raw response from GET /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    pub job: String,
}

/// Raw response from GET /movie/{id}/videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub name: String,
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

impl TmdbMovie {
    /// Extracts the year component of the release date, if present
    pub fn release_year(&self) -> Option<String> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .map(str::to_string)
    }

    /// Capitalized original language code ("en" -> "En"), matching the
    /// casing used on recommendation cards
    pub fn display_language(&self) -> Option<String> {
        self.original_language.as_deref().map(|code| {
            let mut chars = code.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
    }

    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.name.clone()).collect()
    }
}
