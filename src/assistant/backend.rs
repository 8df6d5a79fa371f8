//! Chat backend port.
//!
//! Defines the interface the assistant uses to talk to a live model.
//! Implementations live beside it: the warehouse `ai_query` path and the
//! direct Anthropic API path.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors from a live completion attempt.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("warehouse error: {0}")]
    Warehouse(#[from] crate::warehouse::WarehouseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Which path produced a chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// `ai_query` through the SQL warehouse.
    Endpoint,
    /// Direct Anthropic Messages API.
    Anthropic,
    /// Canned offline responder.
    Offline,
}

/// A live completion backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Which `ReplySource` this backend reports.
    fn source(&self) -> ReplySource;

    /// Complete a fully built prompt into a reply.
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError>;
}
