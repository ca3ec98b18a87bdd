use std::sync::Arc;

use cinematch::{
    config::Config,
    routes::{create_router, AppState},
    services::{corpus, providers::TmdbProvider, RecommendationEngine},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // The corpus and similarity matrix are built once and shared read-only
    let records = corpus::load_corpus(&config.movies_csv, &config.credits_csv)?;
    let engine = tokio::task::spawn_blocking(move || RecommendationEngine::new(records)).await?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
    );

    let state = Arc::new(AppState::new(engine, Arc::new(provider)));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
