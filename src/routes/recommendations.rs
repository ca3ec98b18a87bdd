use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::MovieCard,
    routes::{AppState, NOT_FOUND_MESSAGE},
    services::enrichment,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub recommendations: Vec<MovieCard>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = params.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    let titles = state.engine.recommend(title);
    if titles.is_empty() {
        tracing::info!(request_id = %request_id, title = %title, "No recommendations found");
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %title,
        count = titles.len(),
        "Enriching recommendations"
    );

    let recommendations = enrichment::enrich(state.metadata_provider.as_ref(), titles).await;

    Ok(Json(RecommendationResponse {
        query: title.to_string(),
        recommendations,
    }))
}
