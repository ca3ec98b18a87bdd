use std::sync::Arc;

use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{providers::MetadataProvider, RecommendationEngine},
};

pub mod movies;
pub mod pages;
pub mod recommendations;

/// Notice shown when a query yields no recommendations
pub const NOT_FOUND_MESSAGE: &str = "Movie not found in database.";

/// Shared application state
///
/// The engine is built once before the server starts and is never mutated.
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub metadata_provider: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, metadata_provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            engine: Arc::new(engine),
            metadata_provider,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/recommendations", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
