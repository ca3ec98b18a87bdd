/// Movie metadata provider abstraction
///
/// Providers resolve a corpus title to display metadata (poster, rating, year,
/// genres, trailer). Lookups are fallible here; callers go through
/// `services::enrichment`, which degrades failures to placeholder values.
use crate::{error::AppResult, models::MovieInfo};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for remote movie catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up display metadata for a title
    ///
    /// A title the catalog does not know resolves to `MovieInfo::unavailable()`
    /// rather than an error.
    async fn lookup(&self, title: &str) -> AppResult<MovieInfo>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
