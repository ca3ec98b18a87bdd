use serde::{Deserialize, Serialize};

/// Poster shown when the catalog has no artwork for a title
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450.png?text=No+Poster";

/// Display value for any metadata field the catalog could not provide
pub const UNAVAILABLE: &str = "N/A";

/// A single row of the recommendation corpus
///
/// The row's position in the corpus is its identifier; titles are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// Plot overview, empty when the dataset has none
    pub overview: String,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, overview: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            overview: overview.into(),
        }
    }
}

/// Display metadata for a recommended movie
///
/// `None` fields are rendered as the "N/A" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieInfo {
    pub poster: String,
    pub rating: Option<f64>,
    pub year: Option<String>,
    pub genres: Option<String>,
    pub trailer: Option<String>,
}

impl MovieInfo {
    /// The record returned when nothing could be fetched for a title
    pub fn unavailable() -> Self {
        Self {
            poster: PLACEHOLDER_POSTER_URL.to_string(),
            rating: None,
            year: None,
            genres: None,
            trailer: None,
        }
    }

    pub fn rating_label(&self) -> String {
        self.rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    pub fn year_label(&self) -> &str {
        self.year.as_deref().unwrap_or(UNAVAILABLE)
    }

    pub fn genres_label(&self) -> &str {
        self.genres.as_deref().unwrap_or(UNAVAILABLE)
    }
}

impl Default for MovieInfo {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// A recommended title together with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub title: String,
    #[serde(flatten)]
    pub info: MovieInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_info_uses_sentinels() {
        let info = MovieInfo::unavailable();
        assert_eq!(info.poster, PLACEHOLDER_POSTER_URL);
        assert_eq!(info.rating_label(), "N/A");
        assert_eq!(info.year_label(), "N/A");
        assert_eq!(info.genres_label(), "N/A");
        assert!(info.trailer.is_none());
    }

    #[test]
    fn test_rating_label() {
        let info = MovieInfo {
            rating: Some(7.3),
            ..MovieInfo::unavailable()
        };
        assert_eq!(info.rating_label(), "7.3");
    }

    #[test]
    fn test_card_serializes_flat() {
        let card = MovieCard {
            title: "Inception".to_string(),
            info: MovieInfo {
                poster: "https://image.tmdb.org/t/p/w500/abc.jpg".to_string(),
                rating: Some(8.1),
                year: Some("2010".to_string()),
                genres: Some("Action, Science Fiction".to_string()),
                trailer: None,
            },
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["title"], "Inception");
        assert_eq!(json["year"], "2010");
        assert_eq!(json["genres"], "Action, Science Fiction");
        assert!(json["trailer"].is_null());
    }
}
