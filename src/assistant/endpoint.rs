//! Live completions through the SQL warehouse.
//!
//! The workspace exposes model serving endpoints to SQL via `ai_query`,
//! so a chat turn is just a one-row SELECT.

use std::sync::Arc;

use async_trait::async_trait;

use crate::assistant::backend::{AssistantError, ChatBackend, ReplySource};
use crate::warehouse::WarehouseClient;

pub struct EndpointBackend {
    warehouse: Arc<WarehouseClient>,
    endpoint: String,
}

impl EndpointBackend {
    pub fn new(warehouse: Arc<WarehouseClient>, endpoint: String) -> Self {
        Self {
            warehouse,
            endpoint,
        }
    }

    fn query_for(&self, prompt: &str) -> String {
        format!(
            "SELECT ai_query('{}', '{}', failOnError => false) AS response",
            escape_sql(&self.endpoint),
            escape_sql(prompt)
        )
    }
}

/// Escape a string for embedding in a single-quoted SQL literal.
fn escape_sql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[async_trait]
impl ChatBackend for EndpointBackend {
    fn name(&self) -> &'static str {
        "warehouse-endpoint"
    }

    fn source(&self) -> ReplySource {
        ReplySource::Endpoint
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let result = self.warehouse.execute(&self.query_for(prompt)).await?;
        match result.first_value() {
            Some(reply) if !reply.is_empty() => Ok(reply.to_string()),
            _ => Err(AssistantError::EmptyResponse),
        }
    }
}
