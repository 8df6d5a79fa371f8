//! Statement Execution API client.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::DatabricksConfig;
use crate::warehouse::statement::{StatementResponse, StatementResult, SubmitRequest};

const STATEMENTS_PATH: &str = "/api/2.0/sql/statements";
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Error type for warehouse operations.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("Databricks host or token not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("statement {statement_id} ended in state {state}: {message}")]
    Statement {
        statement_id: String,
        state: String,
        message: String,
    },

    #[error("statement timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Client for running SQL against a Databricks SQL warehouse.
#[derive(Debug, Clone)]
pub struct WarehouseClient {
    http: reqwest::Client,
    base_url: String,
    warehouse_id: String,
    token: String,
    statement_timeout: Duration,
}

impl WarehouseClient {
    /// Build a client from configuration.
    ///
    /// Fails with `NotConfigured` when host or token are missing; the
    /// service then runs in offline mode.
    pub fn from_config(db: &DatabricksConfig) -> Result<Self, WarehouseError> {
        if !db.is_authenticated() {
            return Err(WarehouseError::NotConfigured);
        }
        let token = db.token.clone().ok_or(WarehouseError::NotConfigured)?;
        Ok(Self::new(db.api_base(), db.warehouse_id().to_string(), token))
    }

    /// Build a client against an explicit base URL. Tests point this at a
    /// local mock of the API.
    pub fn new(base_url: String, warehouse_id: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            warehouse_id,
            token,
            statement_timeout: Duration::from_secs(300),
        }
    }

    /// Replace the per-statement timeout (default 300s).
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = timeout;
        self
    }

    /// Execute one statement and wait for its result.
    pub async fn execute(&self, sql: &str) -> Result<StatementResult, WarehouseError> {
        let deadline = Instant::now() + self.statement_timeout;

        let submit = SubmitRequest {
            statement: sql,
            warehouse_id: &self.warehouse_id,
            wait_timeout: "30s",
            on_wait_timeout: "CONTINUE",
        };

        let url = format!("{}{}", self.base_url, STATEMENTS_PATH);
        let mut response = self.decode(self.http.post(&url).json(&submit)).await?;

        while matches!(response.status.state.as_str(), "PENDING" | "RUNNING") {
            if Instant::now() >= deadline {
                return Err(WarehouseError::Timeout {
                    secs: self.statement_timeout.as_secs(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
            let poll_url = format!("{}{}/{}", self.base_url, STATEMENTS_PATH, response.statement_id);
            response = self.decode(self.http.get(&poll_url)).await?;
        }

        match response.status.state.as_str() {
            "SUCCEEDED" => Ok(StatementResult::from_response(&response)),
            state => {
                let message = response
                    .status
                    .error
                    .as_ref()
                    .and_then(|e| e.message.clone())
                    .unwrap_or_else(|| "no error message".to_string());
                Err(WarehouseError::Statement {
                    statement_id: response.statement_id,
                    state: state.to_string(),
                    message,
                })
            }
        }
    }

    /// Execute statements in sequence, stopping at the first failure.
    pub async fn execute_many(
        &self,
        statements: &[String],
    ) -> Result<Vec<StatementResult>, WarehouseError> {
        let mut results = Vec::with_capacity(statements.len());
        for sql in statements {
            results.push(self.execute(sql).await?);
        }
        Ok(results)
    }

    async fn decode(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<StatementResponse, WarehouseError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WarehouseError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
