use std::sync::Arc;

use crate::{
    error::RecommendationServiceError,
    models::{UserPreferences, Video},
    services::providers::CompletionProvider,
    storage::CatalogStore,
};

/// Fixed system instruction for the recommendation model
pub const SYSTEM_PROMPT: &str = "You are an AI recommendation system for a streaming platform. \
    Analyze user preferences and viewing history to suggest relevant content. \
    Return only valid JSON.";

/// Rendered in the prompt when a preference list is absent or empty
const NO_PREFERENCES: &str = "No specific preferences";

/// Maximum number of videos served by the trending fallback; matches the
/// first visible row of the browse grid.
pub const FALLBACK_LIMIT: usize = 6;

/// Which branch of the pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    /// The model reply resolved against the catalog
    Personalized,
    /// The trending subset, substituted after a pipeline failure
    Trending,
}

/// The outcome of a recommendation request. Always a legitimate, renderable
/// sequence; an empty list means "no personalized content yet", not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub videos: Vec<Video>,
    pub source: RecommendationSource,
}

/// Builds the natural-language instruction sent to the model.
///
/// Pure function of its inputs: the watched titles, the preference set, and
/// the catalog in iteration order. Identical inputs yield identical strings.
pub fn build_prompt(
    watched_titles: &[String],
    preferences: &UserPreferences,
    catalog: &[Video],
) -> String {
    let history = watched_titles.join(", ");
    let genres = join_or_placeholder(preferences.genres.as_deref());
    let categories = join_or_placeholder(preferences.categories.as_deref());

    let catalog_lines = catalog
        .iter()
        .map(|video| {
            format!(
                "{} ({}) - {}",
                video.title,
                video.year,
                video.genre.as_deref().unwrap_or_default().join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the user's viewing history and preferences, recommend movies and TV shows.\n\
         \n\
         User's watch history (video titles): {history}\n\
         User's preferred genres: {genres}\n\
         User's preferred categories: {categories}\n\
         \n\
         Available videos to recommend from:\n\
         {catalog_lines}\n\
         \n\
         Please return a JSON object with recommendations array containing video IDs \
         in order of recommendation strength.\n\
         Response format: {{ \"recommendations\": [1, 4, 2] }}"
    )
}

fn join_or_placeholder(values: Option<&[String]>) -> String {
    match values {
        Some(values) if !values.is_empty() => values.join(", "),
        _ => NO_PREFERENCES.to_string(),
    }
}

/// Extracts the ordered id list from the model's raw reply.
///
/// A reply that is not JSON at all propagates as `MalformedReply` for the
/// fallback to handle. A missing or non-array `recommendations` field
/// degrades to an empty list; non-integer elements are skipped.
pub fn parse_recommended_ids(raw: &str) -> Result<Vec<i32>, RecommendationServiceError> {
    let reply: serde_json::Value = serde_json::from_str(raw)?;

    let ids = reply
        .get("recommendations")
        .and_then(|field| field.as_array())
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_i64())
                .map(|id| id as i32)
                .collect()
        })
        .unwrap_or_default();

    Ok(ids)
}

/// The recommendation pipeline: prompt assembly, model call, resolution
/// against the catalog, and the trending fallback.
///
/// Store and provider are injected at construction so the pipeline can be
/// exercised in isolation with fakes.
pub struct RecommendationEngine {
    store: Arc<dyn CatalogStore>,
    provider: Arc<dyn CompletionProvider>,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn CatalogStore>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { store, provider }
    }

    /// Generates personalized watch recommendations.
    ///
    /// Never fails: any error from the model call or its reply handling is
    /// logged and answered with the trending subset truncated to
    /// `FALLBACK_LIMIT`. Callers only ever see an ordered list of videos.
    pub async fn recommend(
        &self,
        watched_titles: &[String],
        preferences: &UserPreferences,
    ) -> Recommendations {
        match self.personalized(watched_titles, preferences).await {
            Ok(videos) => {
                tracing::info!(
                    count = videos.len(),
                    provider = self.provider.name(),
                    "Personalized recommendations resolved"
                );
                Recommendations {
                    videos,
                    source: RecommendationSource::Personalized,
                }
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    provider = self.provider.name(),
                    "Recommendation pipeline failed, serving trending fallback"
                );
                Recommendations {
                    videos: self.fallback().await,
                    source: RecommendationSource::Trending,
                }
            }
        }
    }

    async fn personalized(
        &self,
        watched_titles: &[String],
        preferences: &UserPreferences,
    ) -> Result<Vec<Video>, RecommendationServiceError> {
        let catalog = self.store.get_all_videos().await;
        let prompt = build_prompt(watched_titles, preferences, &catalog);

        let reply = self.provider.complete_json(SYSTEM_PROMPT, &prompt).await?;
        let ids = parse_recommended_ids(&reply)?;

        // Resolve each id in reply order; unknown ids are dropped silently
        // rather than failing the whole operation.
        let mut videos = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(video) = self.store.get_video_by_id(id).await {
                videos.push(video);
            } else {
                tracing::debug!(video_id = id, "Model recommended an unknown video id");
            }
        }

        Ok(videos)
    }

    async fn fallback(&self) -> Vec<Video> {
        let mut trending = self.store.get_trending_videos().await;
        trending.truncate(FALLBACK_LIMIT);
        trending
    }
}
