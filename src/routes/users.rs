use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{InsertWatchHistory, InsertWatchlist, User, UserPreferences, WatchHistoryEntry,
        WatchlistEntry},
    routes::DEMO_USER_ID,
    state::AppState,
};

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHistoryRequest {
    pub video_id: i32,
    #[serde(default)]
    pub progress: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub progress: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchlistRequest {
    pub video_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistStatusResponse {
    pub is_in_watchlist: bool,
}

// Handlers

/// Get the demo user
pub async fn get_user(State(state): State<AppState>) -> AppResult<Json<User>> {
    state
        .store
        .get_user(DEMO_USER_ID)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Replace the demo user's preference set
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(preferences): Json<UserPreferences>,
) -> AppResult<Json<User>> {
    state
        .store
        .update_user_preferences(DEMO_USER_ID, preferences)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Get the demo user's watch history
pub async fn get_history(State(state): State<AppState>) -> Json<Vec<WatchHistoryEntry>> {
    Json(state.store.get_watch_history(DEMO_USER_ID).await)
}

/// Record a watch-history entry for the demo user
pub async fn add_history(
    State(state): State<AppState>,
    Json(request): Json<AddHistoryRequest>,
) -> Json<WatchHistoryEntry> {
    let entry = state
        .store
        .add_to_watch_history(InsertWatchHistory {
            user_id: DEMO_USER_ID,
            video_id: request.video_id,
            progress: request.progress,
        })
        .await;

    Json(entry)
}

/// Update watch progress on an existing history entry
pub async fn update_progress(
    State(state): State<AppState>,
    Path(video_id): Path<i32>,
    Json(request): Json<UpdateProgressRequest>,
) -> AppResult<Json<WatchHistoryEntry>> {
    state
        .store
        .update_watch_progress(DEMO_USER_ID, video_id, request.progress)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Watch history entry not found".to_string()))
}

/// Get the demo user's watchlist
pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<WatchlistEntry>> {
    Json(state.store.get_watchlist(DEMO_USER_ID).await)
}

/// Add a video to the demo user's watchlist (idempotent per video)
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Json(request): Json<AddWatchlistRequest>,
) -> Json<WatchlistEntry> {
    let entry = state
        .store
        .add_to_watchlist(InsertWatchlist {
            user_id: DEMO_USER_ID,
            video_id: request.video_id,
        })
        .await;

    Json(entry)
}

/// Remove a video from the demo user's watchlist
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(video_id): Path<i32>,
) -> AppResult<Json<Value>> {
    if state
        .store
        .remove_from_watchlist(DEMO_USER_ID, video_id)
        .await
    {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound("Video not in watchlist".to_string()))
    }
}

/// Check whether a video is on the demo user's watchlist
pub async fn check_watchlist(
    State(state): State<AppState>,
    Path(video_id): Path<i32>,
) -> Json<WatchlistStatusResponse> {
    let is_in_watchlist = state.store.is_in_watchlist(DEMO_USER_ID, video_id).await;
    Json(WatchlistStatusResponse { is_in_watchlist })
}
