use serde::{Deserialize, Serialize};

// ============================================================================
// Chat Completion API Types
// ============================================================================

/// Request body for POST /v1/chat/completions
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Constrains the model's own output to a JSON object
    pub response_format: ResponseFormat,
    /// Upper bound on generated tokens; bounds cost and latency, not
    /// correctness
    pub max_tokens: u32,
}

/// A single role-tagged message in the conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Output-shape directive for the endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Raw API response from POST /v1/chat/completions
#[derive(Debug, Clone, Deserialize)]
pub struct ApiChatCompletion {
    #[serde(default)]
    pub choices: Vec<ApiChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChatChoice {
    pub message: ApiChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChatMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ApiChatCompletion {
    /// Extracts the body of the single reply message, if any was returned.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}
