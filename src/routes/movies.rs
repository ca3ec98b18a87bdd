use axum::{extract::State, Json};
use std::sync::Arc;

use crate::routes::AppState;

/// Handler listing every corpus title in row order
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .engine
            .titles()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}
