/// TMDB (The Movie Database) metadata provider
///
/// API Flow, one request after another:
/// 1. Search: /search/movie?query=… → first hit supplies id, poster, rating, release date
/// 2. Details: /movie/{id} → genre names
/// 3. Videos: /movie/{id}/videos → first YouTube trailer
use crate::{
    error::{AppError, AppResult},
    models::{
        MovieInfo, TmdbMovie, TmdbMovieDetails, TmdbSearchResponse, TmdbVideos,
        PLACEHOLDER_POSTER_URL,
    },
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, image_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issues an authenticated GET and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        // Request URLs carry the API key, so they are stripped from errors
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for {}",
                status, path
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(path = %path, response = %body, "Unparseable TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    async fn search_movie(&self, title: &str) -> AppResult<Option<TmdbMovie>> {
        let response: TmdbSearchResponse =
            self.get_json("/search/movie", &[("query", title)]).await?;
        Ok(response.results.into_iter().next())
    }

    async fn fetch_genres(&self, movie_id: u64) -> AppResult<Option<String>> {
        let details: TmdbMovieDetails = self.get_json(&format!("/movie/{}", movie_id), &[]).await?;
        Ok(details.genre_text())
    }

    async fn fetch_trailer(&self, movie_id: u64) -> AppResult<Option<String>> {
        let videos: TmdbVideos = self
            .get_json(&format!("/movie/{}/videos", movie_id), &[])
            .await?;
        Ok(videos.trailer_url())
    }

    fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path.filter(|p| !p.is_empty()) {
            Some(path) if path.starts_with('/') => format!("{}{}", self.image_url, path),
            Some(path) => format!("{}/{}", self.image_url, path),
            None => PLACEHOLDER_POSTER_URL.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn lookup(&self, title: &str) -> AppResult<MovieInfo> {
        let Some(movie) = self.search_movie(title).await? else {
            tracing::debug!(title = %title, provider = "tmdb", "No search results");
            return Ok(MovieInfo::unavailable());
        };

        let genres = self.fetch_genres(movie.id).await?;
        let trailer = self.fetch_trailer(movie.id).await?;

        let info = MovieInfo {
            poster: self.poster_url(movie.poster_path.as_deref()),
            rating: movie.vote_average,
            year: movie.release_year(),
            genres,
            trailer,
        };

        tracing::debug!(
            title = %title,
            tmdb_id = movie.id,
            has_trailer = info.trailer.is_some(),
            provider = "tmdb",
            "Metadata fetched"
        );

        Ok(info)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
