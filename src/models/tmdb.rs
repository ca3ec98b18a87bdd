use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// A single search hit
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl TmdbMovie {
    /// Release year taken from `release_date` ("YYYY-MM-DD")
    pub fn release_year(&self) -> Option<String> {
        let date = self.release_date.as_deref().map(str::trim).unwrap_or("");
        if date.is_empty() {
            return None;
        }

        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => Some(parsed.year().to_string()),
            // Partial dates still carry a usable year prefix
            Err(_) => date
                .split('-')
                .next()
                .filter(|year| !year.is_empty())
                .map(str::to_string),
        }
    }
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

impl TmdbMovieDetails {
    /// Genre names joined with ", ", or `None` when the movie has no genres
    pub fn genre_text(&self) -> Option<String> {
        if self.genres.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.genres.iter().map(|g| g.name.as_str()).collect();
        Some(names.join(", "))
    }
}

/// Response from GET /movie/{id}/videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    #[serde(rename = "type")]
    pub video_type: String,
    pub site: String,
    pub key: String,
}

impl TmdbVideos {
    /// Watch URL of the first YouTube trailer
    pub fn trailer_url(&self) -> Option<String> {
        self.results
            .iter()
            .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
            .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
    }
}
