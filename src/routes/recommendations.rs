use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    models::{UserPreferences, Video},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Previously watched entries; only the titles feed the prompt, any
    /// extra fields the client sends along are ignored.
    #[serde(default)]
    pub watch_history: Vec<WatchedEntry>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

#[derive(Debug, Deserialize)]
pub struct WatchedEntry {
    pub title: String,
}

/// Handler for the recommendations endpoint.
///
/// The engine answers pipeline failures with the trending fallback, so the
/// client always receives an ordered video array under the same visual
/// treatment. An empty array is the "keep watching to get recommendations"
/// state, not an error.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Vec<Video>> {
    let watched_titles: Vec<String> = request
        .watch_history
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    let preferences = request.preferences.unwrap_or_default();

    let recommendations = state
        .recommender
        .recommend(&watched_titles, &preferences)
        .await;

    Json(recommendations.videos)
}
