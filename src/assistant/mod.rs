//! Answer sources for the policy chat.
//!
//! Two backends produce the same [`ChatResponse`] shape:
//! - [`mock`] builds an answer locally from the policy matcher and canned text.
//! - [`claude`] relays the question to the Anthropic Messages API.

pub mod claude;
pub mod mock;

use std::time::Duration;

pub use claude::{build_prompt, ClaudeClient, ClaudeError, FALLBACK_ANSWER};
pub use mock::{estimate_tokens, mock_policy_answer, MockAnswer, NO_MATCH_ANSWER};

use crate::models::ChatResponse;
use crate::store::Store;

/// Which source answers chat questions.
#[derive(Debug, Clone)]
pub enum ChatBackend {
    /// Local answers, after an artificial pause that mimics model latency.
    Mock { delay: Duration },
    Claude(ClaudeClient),
}

impl ChatBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mock { .. } => "mock",
            Self::Claude(_) => "claude",
        }
    }
}

/// A chat backend bound to the dataset it answers from.
#[derive(Debug, Clone)]
pub struct Assistant {
    store: Store,
    backend: ChatBackend,
}

impl Assistant {
    pub fn new(store: Store, backend: ChatBackend) -> Self {
        Self { store, backend }
    }

    /// Mock backend with no delay.
    pub fn mock(store: Store) -> Self {
        Self::new(
            store,
            ChatBackend::Mock {
                delay: Duration::ZERO,
            },
        )
    }

    pub fn backend(&self) -> &ChatBackend {
        &self.backend
    }

    pub async fn answer(&self, question: &str, role_id: &str) -> Result<ChatResponse, ClaudeError> {
        match &self.backend {
            ChatBackend::Mock { delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                let answer = mock_policy_answer(&self.store, question, role_id);
                tracing::debug!(
                    role_id,
                    tokens = answer.tokens_used,
                    sources = ?answer.data_sources_queried,
                    "Mock answer generated"
                );
                Ok(answer.into())
            }
            ChatBackend::Claude(client) => client.ask(question, role_id).await,
        }
    }
}
