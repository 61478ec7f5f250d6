use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
///
/// Both fields are optional at the type level so that a missing field is
/// reported with the API's own error body instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            role_id: Some(role_id.into()),
        }
    }

    /// Both fields, if present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let message = self.message.as_deref().filter(|m| !m.is_empty())?;
        let role_id = self.role_id.as_deref().filter(|r| !r.is_empty())?;
        Some((message, role_id))
    }
}

/// Successful chat answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    /// Policy IDs the answer was drawn from.
    pub citations: Vec<String>,
    pub tokens_used: u64,
}

/// Error body returned by every API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
