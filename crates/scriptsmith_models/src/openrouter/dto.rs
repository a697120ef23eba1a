//! OpenRouter chat completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One message of a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// Message role ("user", "assistant", "system").
    role: String,
    /// Message text; providers may send `null`.
    #[serde(default)]
    content: Option<String>,
}

impl ChatMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation, a single user message for every Scriptsmith call
    messages: Vec<ChatMessage>,
    /// Output-token limit
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
}

impl ChatRequest {
    /// Creates a new builder for `ChatRequest`.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Generated message
    message: ChatMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatUsage {
    /// Prompt tokens consumed
    #[serde(default)]
    prompt_tokens: u32,
    /// Completion tokens generated
    #[serde(default)]
    completion_tokens: u32,
    /// Sum of both
    #[serde(default)]
    total_tokens: u32,
}

/// Chat completions response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatResponse {
    /// Completion choices, usually exactly one
    #[serde(default)]
    choices: Vec<ChatChoice>,
    /// Usage, when reported
    #[serde(default)]
    usage: Option<ChatUsage>,
}

impl ChatResponse {
    /// Text of the first choice, if any choice exists.
    ///
    /// A `null` message content yields an empty string.
    pub fn first_text(&self) -> Option<String> {
        self.choices
            .first()
            .map(|choice| choice.message.content.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_chat_shape() {
        let request = ChatRequest::builder()
            .model("anthropic/claude-opus-4.1")
            .messages(vec![ChatMessage::user("Hi")])
            .max_tokens(10u32)
            .temperature(0.7f32)
            .build()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hi");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_response_with_null_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some(""));
        assert!(response.usage().is_none());
    }

    #[test]
    fn test_response_without_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(response.first_text().is_none());
    }
}
