/// Text-generation provider abstraction
///
/// The recommendation engine talks to the external model through this trait
/// so a different endpoint (or a canned fake in tests) can be swapped in
/// without touching the pipeline.
use crate::error::RecommendationServiceError;

#[cfg(test)]
use mockall::automock;

pub mod openai;

pub use openai::OpenAiProvider;

/// A client for a chat-style text-generation endpoint.
///
/// Implementations send one system message and one user message, ask the
/// endpoint to constrain its output to a JSON object, and return the raw
/// text of the single reply. Transport failures, non-success statuses,
/// rejected credentials, and empty replies all surface as
/// `RecommendationServiceError`; nothing is retried at this layer.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Requests a JSON-object completion for the given prompts and returns
    /// the raw reply text.
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, RecommendationServiceError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
