use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod recommendations;
pub mod users;
pub mod videos;

/// The demo user every request acts as; there is no authentication model.
pub const DEMO_USER_ID: i32 = 1;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/videos", get(videos::get_all))
        .route("/videos/trending", get(videos::get_trending))
        .route("/videos/featured", get(videos::get_featured))
        .route("/videos/category/:category", get(videos::get_by_category))
        .route("/videos/genre/:genre", get(videos::get_by_genre))
        .route("/videos/:id", get(videos::get_by_id))
        .route("/search", get(videos::search))
        // Demo user
        .route("/user", get(users::get_user))
        .route("/user/preferences", put(users::update_preferences))
        .route("/user/history", get(users::get_history))
        .route("/user/history", post(users::add_history))
        .route("/user/history/:video_id", put(users::update_progress))
        .route("/user/watchlist", get(users::get_watchlist))
        .route("/user/watchlist", post(users::add_to_watchlist))
        .route(
            "/user/watchlist/:video_id",
            delete(users::remove_from_watchlist),
        )
        .route("/user/watchlist/:video_id", get(users::check_watchlist))
        // Recommendations
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
