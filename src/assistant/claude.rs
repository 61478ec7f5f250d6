//! HTTP client for the Anthropic Messages API.
//!
//! One question becomes one user message built from [`build_prompt`]. The
//! first text block of the reply is the answer; token usage is reported back
//! as input plus output tokens.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::models::ChatResponse;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Answer used when the reply carries no text block.
pub const FALLBACK_ANSWER: &str = "Sorry, I could not generate a response.";

/// Upstream call failures.
#[derive(Debug, Error)]
pub enum ClaudeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: API key rejected")]
    Unauthorized,

    #[error("Rate limited by upstream: {0}")]
    RateLimited(String),

    #[error("Upstream error: {status}: {body}")]
    Upstream { status: StatusCode, body: String },
}

// ============================================================
// Messages API wire types
// ============================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

/// The single user message sent upstream.
pub fn build_prompt(role_id: &str, question: &str) -> String {
    format!(
        "You are an AI onboarding assistant for Airbnb employees. The user is in the role: {role_id}.\n          \n\
Please answer their question about Airbnb policies, benefits, or onboarding.\n\
\n\
User question: {question}\n\
\n\
Provide a helpful, friendly response. If you reference policies, mention them by name."
    )
}

#[derive(Debug, Clone)]
pub struct ClaudeClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl ClaudeClient {
    /// `base_url` is the API root, e.g. `https://api.anthropic.com`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client: Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask one question on behalf of `role_id`.
    pub async fn ask(&self, question: &str, role_id: &str) -> Result<ChatResponse, ClaudeError> {
        let prompt = build_prompt(role_id, question);
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        };

        tracing::debug!(model = %self.model, role_id, "Sending question to Messages API");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let reply: MessagesResponse = self.handle_response(response).await?;
        let tokens_used = reply.usage.input_tokens + reply.usage.output_tokens;
        let answer = reply
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        Ok(ChatResponse {
            answer,
            citations: Vec::new(),
            tokens_used,
        })
    }

    /// Convert non-2xx statuses to `ClaudeError` and decode the body otherwise.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<MessagesResponse, ClaudeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClaudeError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(ClaudeError::RateLimited(body)),
            _ => Err(ClaudeError::Upstream { status, body }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_interpolates_role_and_question() {
        let prompt = build_prompt("product-manager", "How do I request PTO?");
        assert!(prompt.starts_with(
            "You are an AI onboarding assistant for Airbnb employees. The user is in the role: product-manager.\n"
        ));
        assert!(prompt.contains("\n\nUser question: How do I request PTO?\n\n"));
        assert!(prompt.ends_with("mention them by name."));
    }

    #[test]
    fn request_serializes_in_messages_api_shape() {
        let body = MessagesRequest {
            model: "claude-test",
            max_tokens: 64,
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "claude-test",
                "max_tokens": 64,
                "messages": [{ "role": "user", "content": "hi" }]
            })
        );
    }

    #[test]
    fn builder_overrides_defaults() {
        let client = ClaudeClient::new("http://localhost:1/", "key");
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(client.base_url, "http://localhost:1");

        let client = client.with_model("claude-test").with_max_tokens(8);
        assert_eq!(client.model(), "claude-test");
        assert_eq!(client.max_tokens, 8);
    }
}
