use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures along the recommendation pipeline: the outbound model call and
/// the parsing of its reply.
///
/// Every variant is recovered by the trending fallback inside the engine;
/// none of them crosses the HTTP boundary.
#[derive(thiserror::Error, Debug)]
pub enum RecommendationServiceError {
    #[error("model transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model endpoint rejected credentials: {0}")]
    Unauthorized(String),

    #[error("model endpoint returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("model returned an empty reply")]
    EmptyReply,

    #[error("model reply was not valid JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),
}
