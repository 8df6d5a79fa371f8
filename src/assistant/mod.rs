//! Chat assistant subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/chat
//!     → session.rs (record message, build prompt with system + context)
//!     → backend.rs (ChatBackend trait)
//!         → endpoint.rs (ai_query through the SQL warehouse, preferred)
//!         → anthropic.rs (direct Messages API, fallback)
//!     → offline.rs (canned actuarial answers, last resort)
//!     → session.rs (record reply)
//! ```
//!
//! # Design Decisions
//! - A live-backend failure degrades that turn to the offline answer;
//!   chat never surfaces a 5xx to the user
//! - Backend choice is fixed at startup, degradation is per turn
//! - History is bounded; the oldest messages fall off

pub mod anthropic;
pub mod backend;
pub mod endpoint;
pub mod offline;
pub mod session;

pub use backend::{AssistantError, ChatBackend, ReplySource};
pub use session::{ChatSession, ContextData};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::ChatConfig;
use crate::warehouse::WarehouseClient;

/// A chat turn's outcome.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub source: ReplySource,
}

/// The assistant: one conversation, one optional live backend.
pub struct Assistant {
    session: Mutex<ChatSession>,
    backend: Option<Box<dyn ChatBackend>>,
    system_prompt: String,
    completion_timeout: Duration,
}

impl Assistant {
    /// Wire up the assistant from configuration.
    ///
    /// Preference order: warehouse `ai_query` endpoint, then the direct
    /// Anthropic API when `ANTHROPIC_API_KEY` is set, then offline only.
    pub fn from_config(
        chat: &ChatConfig,
        ai_endpoint: &str,
        warehouse: Option<Arc<WarehouseClient>>,
        anthropic_api_key: Option<String>,
    ) -> Self {
        let backend: Option<Box<dyn ChatBackend>> = match warehouse {
            Some(warehouse) => {
                tracing::info!(endpoint = ai_endpoint, "Chat assistant using warehouse endpoint");
                Some(Box::new(endpoint::EndpointBackend::new(
                    warehouse,
                    ai_endpoint.to_string(),
                )))
            }
            None => match anthropic_api_key.filter(|k| !k.is_empty()) {
                Some(key) => {
                    tracing::info!("Chat assistant using direct Anthropic API");
                    Some(Box::new(anthropic::AnthropicBackend::new(key)))
                }
                None => {
                    tracing::warn!(
                        "No Databricks auth and no Anthropic key; chat runs offline"
                    );
                    None
                }
            },
        };

        Self::with_backend(chat, backend)
    }

    /// An assistant over an explicit backend, or none for offline only.
    /// Tests wire mock backends through this.
    pub fn with_backend(chat: &ChatConfig, backend: Option<Box<dyn ChatBackend>>) -> Self {
        Self {
            session: Mutex::new(ChatSession::new(chat.history_limit)),
            backend,
            system_prompt: chat
                .system_prompt
                .clone()
                .unwrap_or_else(|| session::SYSTEM_PROMPT.to_string()),
            completion_timeout: Duration::from_secs(chat.completion_timeout_secs),
        }
    }

    /// Answer one user message.
    pub async fn respond(&self, message: &str, context: Option<&ContextData>) -> ChatReply {
        let prompt = {
            let mut session = self.session.lock().await;
            session.push_user(message);
            session.build_prompt(&self.system_prompt, message, context)
        };

        if let Some(backend) = &self.backend {
            match tokio::time::timeout(self.completion_timeout, backend.complete(&prompt)).await
            {
                Ok(Ok(reply)) => {
                    self.session.lock().await.push_assistant(&reply);
                    return ChatReply {
                        reply,
                        source: backend.source(),
                    };
                }
                Ok(Err(e)) => {
                    tracing::warn!(backend = backend.name(), error = %e, "Live completion failed, degrading to offline");
                }
                Err(_) => {
                    tracing::warn!(backend = backend.name(), "Live completion timed out, degrading to offline");
                }
            }
        }

        let reply = offline::respond(message);
        self.session.lock().await.push_assistant(&reply);
        ChatReply {
            reply,
            source: ReplySource::Offline,
        }
    }

    /// Drop the conversation history.
    pub async fn reset(&self) {
        self.session.lock().await.reset();
        tracing::info!("Conversation history reset");
    }

    /// Human-readable summary of the conversation so far.
    pub async fn summary(&self) -> String {
        self.session.lock().await.summary()
    }

    /// Whether any live backend is wired.
    pub fn is_online(&self) -> bool {
        self.backend.is_some()
    }
}
