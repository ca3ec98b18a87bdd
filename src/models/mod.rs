mod movie;
mod tmdb;

pub use movie::{MovieCard, MovieInfo, MovieRecord, PLACEHOLDER_POSTER_URL, UNAVAILABLE};
pub use tmdb::{TmdbGenre, TmdbMovie, TmdbMovieDetails, TmdbSearchResponse, TmdbVideo, TmdbVideos};
