/// OpenAI chat-completion provider
///
/// Wraps the /v1/chat/completions endpoint in the CompletionProvider trait.
/// The request pins `response_format` to a JSON object and carries the
/// configured token ceiling; the reply's single message body is returned
/// verbatim for the resolver to parse.
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    config::Config,
    error::RecommendationServiceError,
    models::openai::{ApiChatCompletion, ChatCompletionRequest, ChatMessage, ResponseFormat},
    services::providers::CompletionProvider,
};

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
            max_tokens,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_api_url.clone(),
            config.openai_model.clone(),
            config.recommendation_max_tokens,
            Duration::from_secs(config.model_timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, RecommendationServiceError> {
        let url = format!("{}/v1/chat/completions", self.api_url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            response_format: ResponseFormat::json_object(),
            max_tokens: self.max_tokens,
        };

        // The outbound call is the pipeline's single suspension point; the
        // per-request timeout bounds how long a request can hang on it.
        let response = self
            .http_client
            .post(&url)
            .timeout(self.timeout)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendationServiceError::Unauthorized(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendationServiceError::Api { status, body });
        }

        let completion: ApiChatCompletion = response.json().await?;
        let content = completion
            .into_content()
            .filter(|content| !content.trim().is_empty())
            .ok_or(RecommendationServiceError::EmptyReply)?;

        tracing::debug!(
            model = %self.model,
            reply_chars = content.len(),
            provider = "openai",
            "Model reply received"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
