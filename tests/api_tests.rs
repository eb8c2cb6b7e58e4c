use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use streamvision_api::error::RecommendationServiceError;
use streamvision_api::services::providers::CompletionProvider;
use streamvision_api::storage::{CatalogStore, MemStorage};
use streamvision_api::{create_router, AppState};

/// Provider that answers every request with the same canned reply.
struct CannedProvider {
    reply: String,
}

impl CannedProvider {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for CannedProvider {
    async fn complete_json(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, RecommendationServiceError> {
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

/// Provider that fails every request, as an unreachable endpoint would.
struct FailingProvider;

#[async_trait::async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete_json(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, RecommendationServiceError> {
        Err(RecommendationServiceError::EmptyReply)
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn create_test_server_with(provider: Arc<dyn CompletionProvider>) -> TestServer {
    let store = Arc::new(MemStorage::with_sample_data());
    let state = AppState::new(store, provider);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(Arc::new(FailingProvider))
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_get_all_videos() {
    let server = create_test_server();

    let response = server.get("/api/videos").await;
    response.assert_status_ok();

    let videos: Vec<serde_json::Value> = response.json();
    assert_eq!(videos.len(), 6);
    assert_eq!(videos[0]["title"], "Inception");
    assert!(!videos[0]["thumbnailUrl"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_video_by_id() {
    let server = create_test_server();

    let response = server.get("/api/videos/4").await;
    response.assert_status_ok();

    let video: serde_json::Value = response.json();
    assert_eq!(video["id"], 4);
    assert_eq!(video["title"], "Dune");
}

#[tokio::test]
async fn test_get_video_by_id_not_found() {
    let server = create_test_server();

    let response = server.get("/api/videos/999").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Video not found");
}

#[tokio::test]
async fn test_get_videos_by_category() {
    let server = create_test_server();

    let response = server.get("/api/videos/category/documentaries").await;
    response.assert_status_ok();

    let videos: Vec<serde_json::Value> = response.json();
    assert_eq!(videos.len(), 2);
    assert!(videos.iter().all(|v| v["category"] == "documentaries"));
}

#[tokio::test]
async fn test_get_videos_by_genre() {
    let server = create_test_server();

    let response = server.get("/api/videos/genre/sci-fi").await;
    response.assert_status_ok();

    let ids: Vec<i64> = response
        .json::<Vec<serde_json::Value>>()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 4, 5]);
}

#[tokio::test]
async fn test_get_trending_videos() {
    let server = create_test_server();

    let response = server.get("/api/videos/trending").await;
    response.assert_status_ok();

    let ids: Vec<i64> = response
        .json::<Vec<serde_json::Value>>()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn test_get_featured_video() {
    let server = create_test_server();

    let response = server.get("/api/videos/featured").await;
    response.assert_status_ok();

    let video: serde_json::Value = response.json();
    assert_eq!(video["id"], 1);
    assert_eq!(video["featured"], true);
}

#[tokio::test]
async fn test_search_videos() {
    let server = create_test_server();

    let response = server.get("/api/search").add_query_param("q", "dream").await;
    response.assert_status_ok();

    let videos: Vec<serde_json::Value> = response.json();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["title"], "Inception");
}

#[tokio::test]
async fn test_search_requires_query() {
    let server = create_test_server();

    let response = server.get("/api/search").add_query_param("q", "  ").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_demo_user() {
    let server = create_test_server();

    let response = server.get("/api/user").await;
    response.assert_status_ok();

    let user: serde_json::Value = response.json();
    assert_eq!(user["id"], 1);
    assert_eq!(user["username"], "demo_user");
}

#[tokio::test]
async fn test_update_preferences_replaces_wholesale() {
    let server = create_test_server();

    let response = server
        .put("/api/user/preferences")
        .json(&json!({ "genres": ["drama"] }))
        .await;
    response.assert_status_ok();

    let user: serde_json::Value = response.json();
    assert_eq!(user["preferences"]["genres"], json!(["drama"]));
    // The seeded categories list is replaced away, not merged
    assert!(user["preferences"].get("categories").is_none());
}

#[tokio::test]
async fn test_watch_history_flow() {
    let server = create_test_server();

    // Record a watch
    let response = server
        .post("/api/user/history")
        .json(&json!({ "videoId": 4 }))
        .await;
    response.assert_status_ok();
    let entry: serde_json::Value = response.json();
    assert_eq!(entry["userId"], 1);
    assert_eq!(entry["videoId"], 4);
    assert_eq!(entry["progress"], 0);

    // Update progress
    let response = server
        .put("/api/user/history/4")
        .json(&json!({ "progress": 42 }))
        .await;
    response.assert_status_ok();
    let entry: serde_json::Value = response.json();
    assert_eq!(entry["progress"], 42);

    // History reflects the update
    let response = server.get("/api/user/history").await;
    response.assert_status_ok();
    let history: Vec<serde_json::Value> = response.json();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["progress"], 42);
}

#[tokio::test]
async fn test_update_progress_without_entry_is_404() {
    let server = create_test_server();

    let response = server
        .put("/api/user/history/4")
        .json(&json!({ "progress": 10 }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_watchlist_flow() {
    let server = create_test_server();

    // Add
    let response = server
        .post("/api/user/watchlist")
        .json(&json!({ "videoId": 2 }))
        .await;
    response.assert_status_ok();
    let entry: serde_json::Value = response.json();
    assert_eq!(entry["videoId"], 2);

    // Adding the same video again returns the same entry
    let response = server
        .post("/api/user/watchlist")
        .json(&json!({ "videoId": 2 }))
        .await;
    let duplicate: serde_json::Value = response.json();
    assert_eq!(duplicate["id"], entry["id"]);

    let response = server.get("/api/user/watchlist").await;
    let watchlist: Vec<serde_json::Value> = response.json();
    assert_eq!(watchlist.len(), 1);

    // Membership check
    let response = server.get("/api/user/watchlist/2").await;
    response.assert_status_ok();
    let status: serde_json::Value = response.json();
    assert_eq!(status["isInWatchlist"], true);

    // Remove
    let response = server.delete("/api/user/watchlist/2").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    let response = server.get("/api/user/watchlist/2").await;
    let status: serde_json::Value = response.json();
    assert_eq!(status["isInWatchlist"], false);
}

#[tokio::test]
async fn test_remove_missing_watchlist_entry_is_404() {
    let server = create_test_server();

    let response = server.delete("/api/user/watchlist/5").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Video not in watchlist");
}

#[tokio::test]
async fn test_recommendations_resolve_in_reply_order() {
    let server =
        create_test_server_with(Arc::new(CannedProvider::new(r#"{"recommendations": [4, 99, 1]}"#)));

    let response = server
        .post("/api/recommendations")
        .json(&json!({
            "watchHistory": [{ "title": "Dune" }, { "title": "Inception" }],
            "preferences": { "genres": ["sci-fi"], "categories": ["movies"] }
        }))
        .await;
    response.assert_status_ok();

    let ids: Vec<i64> = response
        .json::<Vec<serde_json::Value>>()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    // Unknown id 99 is dropped; reply order is preserved
    assert_eq!(ids, vec![4, 1]);
}

#[tokio::test]
async fn test_recommendations_tolerate_minimal_body() {
    let server =
        create_test_server_with(Arc::new(CannedProvider::new(r#"{"recommendations": [2]}"#)));

    let response = server.post("/api/recommendations").json(&json!({})).await;
    response.assert_status_ok();

    let videos: Vec<serde_json::Value> = response.json();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["id"], 2);
}

#[tokio::test]
async fn test_recommendations_fall_back_to_trending_on_failure() {
    let server = create_test_server_with(Arc::new(FailingProvider));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "watchHistory": [], "preferences": {} }))
        .await;
    // Pipeline failures never surface as an error status
    response.assert_status_ok();

    let ids: Vec<i64> = response
        .json::<Vec<serde_json::Value>>()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn test_recommendations_fall_back_on_malformed_reply() {
    let server = create_test_server_with(Arc::new(CannedProvider::new("not json at all")));

    let response = server.post("/api/recommendations").json(&json!({})).await;
    response.assert_status_ok();

    let ids: Vec<i64> = response
        .json::<Vec<serde_json::Value>>()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn test_recommendations_missing_field_yields_empty_list() {
    // A well-formed reply without a recommendations array degrades to an
    // empty personalized result, not to the trending fallback.
    let server = create_test_server_with(Arc::new(CannedProvider::new(r#"{"other": true}"#)));

    let response = server.post("/api/recommendations").json(&json!({})).await;
    response.assert_status_ok();

    let videos: Vec<serde_json::Value> = response.json();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_recommendations_empty_store_with_failing_provider() {
    let store = Arc::new(MemStorage::new());
    let state = AppState::new(store, Arc::new(FailingProvider));
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server.post("/api/recommendations").json(&json!({})).await;
    response.assert_status_ok();

    let videos: Vec<serde_json::Value> = response.json();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_request_id_header_echoed() {
    let server = create_test_server();

    let response = server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_store_usable_while_recommendations_run() {
    // Watchlist writes and recommendation reads interleave without
    // corrupting each other.
    let store: Arc<MemStorage> = Arc::new(MemStorage::with_sample_data());
    let state = AppState::new(
        store.clone(),
        Arc::new(CannedProvider::new(r#"{"recommendations": [1]}"#)),
    );
    let server = TestServer::new(create_router(state)).unwrap();

    let (rec_response, add_response) = tokio::join!(
        async { server.post("/api/recommendations").json(&json!({})).await },
        async {
            server
                .post("/api/user/watchlist")
                .json(&json!({ "videoId": 3 }))
                .await
        },
    );
    rec_response.assert_status_ok();
    add_response.assert_status_ok();

    assert!(store.is_in_watchlist(1, 3).await);
}
