use crate::{
    models::{MovieCard, MovieInfo},
    services::providers::MetadataProvider,
};

/// Best-effort metadata for one title
///
/// Any provider failure is logged and replaced by the placeholder record.
pub async fn fetch_movie_info(provider: &dyn MetadataProvider, title: &str) -> MovieInfo {
    match provider.lookup(title).await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(
                title = %title,
                provider = provider.name(),
                error = %e,
                "Metadata lookup failed, using placeholders"
            );
            MovieInfo::unavailable()
        }
    }
}

/// Builds one card per title, looking titles up one at a time
pub async fn enrich(provider: &dyn MetadataProvider, titles: Vec<String>) -> Vec<MovieCard> {
    let mut cards = Vec::with_capacity(titles.len());
    for title in titles {
        let info = fetch_movie_info(provider, &title).await;
        cards.push(MovieCard { title, info });
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockMetadataProvider;

    fn sample_info() -> MovieInfo {
        MovieInfo {
            poster: "https://image.tmdb.org/t/p/w500/x.jpg".to_string(),
            rating: Some(7.9),
            year: Some("2014".to_string()),
            genres: Some("Adventure, Drama".to_string()),
            trailer: Some("https://www.youtube.com/watch?v=zSWdZVtXT7E".to_string()),
        }
    }

    #[tokio::test]
    async fn test_fetch_movie_info_success() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_lookup()
            .returning(|_| Ok(sample_info()));

        let info = fetch_movie_info(&provider, "Interstellar").await;
        assert_eq!(info, sample_info());
    }

    #[tokio::test]
    async fn test_fetch_movie_info_degrades_on_error() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_lookup()
            .returning(|_| Err(AppError::ExternalApi("TMDB returned 503".to_string())));
        provider.expect_name().return_const("mock");

        let info = fetch_movie_info(&provider, "Interstellar").await;
        assert_eq!(info, MovieInfo::unavailable());
    }

    #[tokio::test]
    async fn test_enrich_keeps_order_and_isolates_failures() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_lookup().returning(|title| {
            if title == "Broken" {
                Err(AppError::Internal("boom".to_string()))
            } else {
                Ok(sample_info())
            }
        });
        provider.expect_name().return_const("mock");

        let titles = vec!["Gravity".to_string(), "Broken".to_string(), "Moon".to_string()];
        let cards = enrich(&provider, titles).await;

        let names: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(names, vec!["Gravity", "Broken", "Moon"]);
        assert_eq!(cards[0].info, sample_info());
        assert_eq!(cards[1].info, MovieInfo::unavailable());
        assert_eq!(cards[2].info, sample_info());
    }

    #[tokio::test]
    async fn test_enrich_empty() {
        let provider = MockMetadataProvider::new();
        assert!(enrich(&provider, Vec::new()).await.is_empty());
    }
}
