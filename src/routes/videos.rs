use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Video,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Get all videos
pub async fn get_all(State(state): State<AppState>) -> Json<Vec<Video>> {
    Json(state.store.get_all_videos().await)
}

/// Get a single video by id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Video>> {
    state
        .store
        .get_video_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
}

/// Get videos in a category
pub async fn get_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Video>> {
    Json(state.store.get_videos_by_category(&category).await)
}

/// Get videos carrying a genre tag
pub async fn get_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Json<Vec<Video>> {
    Json(state.store.get_videos_by_genre(&genre).await)
}

/// Get the trending subset
pub async fn get_trending(State(state): State<AppState>) -> Json<Vec<Video>> {
    Json(state.store.get_trending_videos().await)
}

/// Get the hero/banner video
pub async fn get_featured(State(state): State<AppState>) -> AppResult<Json<Video>> {
    state
        .store
        .get_featured_video()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No featured video found".to_string()))
}

/// Substring search over titles, descriptions, and genre tags
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Video>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let videos = state.store.search_videos(&params.q).await;

    tracing::debug!(query = %params.q, results = videos.len(), "Video search completed");

    Ok(Json(videos))
}
