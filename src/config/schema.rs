//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the pricing cell service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Databricks workspace connection settings.
    pub databricks: DatabricksConfig,

    /// HTTP server settings (port, timeouts, body limits).
    pub server: ServerConfig,

    /// Chat assistant settings.
    pub chat: ChatConfig,

    /// Child process supervision settings.
    pub supervisor: SupervisorConfig,

    /// Names of the brochure analysis tables.
    pub tables: TableConfig,
}

/// Databricks workspace connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabricksConfig {
    /// Workspace hostname, without scheme (e.g. "adb-1234.azuredatabricks.net").
    pub host: String,

    /// SQL warehouse HTTP path (e.g. "/sql/1.0/warehouses/abc123").
    pub warehouse_http_path: String,

    /// Model serving endpoint name used by `ai_query`.
    pub ai_endpoint: String,

    /// Personal access token. Absence means the service runs offline.
    pub token: Option<String>,

    /// Unity Catalog name holding the analysis schema.
    pub catalog: String,

    /// Schema name under the catalog.
    pub schema: String,

    /// Volume path where uploaded brochures land.
    pub volume_path: String,
}

impl Default for DatabricksConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            warehouse_http_path: "/sql/1.0/warehouses/default".to_string(),
            ai_endpoint: "databricks-claude-3-sonnet".to_string(),
            token: None,
            catalog: "insurance".to_string(),
            schema: "fa_pricing".to_string(),
            volume_path: "/Volumes/insurance/fa_pricing/user_uploaded_brochures".to_string(),
        }
    }
}

impl DatabricksConfig {
    /// Base URL of the workspace REST API.
    pub fn api_base(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Warehouse ID, taken from the last segment of the HTTP path.
    pub fn warehouse_id(&self) -> &str {
        self.warehouse_http_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.warehouse_http_path)
    }

    /// True when both a host and a token are configured.
    pub fn is_authenticated(&self) -> bool {
        !self.host.is_empty() && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening port. Overridden by the PORT environment variable.
    pub port: u16,

    /// Request timeout in seconds. Pipeline runs are long, so this is
    /// generous by default.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes (brochure uploads).
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8050,
            request_timeout_secs: 330,
            max_body_bytes: 25 * 1024 * 1024,
        }
    }
}

/// Chat assistant settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Messages retained in the conversation history.
    pub history_limit: usize,

    /// Optional replacement for the built-in actuarial system prompt.
    pub system_prompt: Option<String>,

    /// Timeout for a single live completion in seconds.
    pub completion_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: 20,
            system_prompt: None,
            completion_timeout_secs: 60,
        }
    }
}

/// Child process supervision settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Delay before restarting a dead child, in seconds.
    pub restart_delay_secs: u64,

    /// Grow the delay exponentially on consecutive failures.
    pub backoff_enabled: bool,

    /// Ceiling for the grown delay, in seconds.
    pub max_delay_secs: u64,

    /// A child that survives this long resets the failure streak.
    pub stable_after_secs: u64,

    /// Give up after this many consecutive failed starts. None = never.
    pub max_restarts: Option<u32>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            restart_delay_secs: 5,
            backoff_enabled: false,
            max_delay_secs: 300,
            stable_after_secs: 60,
            max_restarts: None,
        }
    }
}

/// Names of the brochure analysis tables, without catalog/schema prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    /// Raw parsed brochure text, one row per document.
    pub parsed: String,

    /// Raw model responses for each parsed document.
    pub endpoint_response: String,

    /// Structured pricing features projected from the responses.
    pub pricing_features: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            parsed: "fa_product_brochure_parsed".to_string(),
            endpoint_response: "fa_product_brochure_endpoint_response".to_string(),
            pricing_features: "fa_product_brochure_pricing_features".to_string(),
        }
    }
}

impl AppConfig {
    /// Fully qualified `catalog.schema.table` name.
    pub fn qualified_table(&self, table: &str) -> String {
        format!(
            "{}.{}.{}",
            self.databricks.catalog, self.databricks.schema, table
        )
    }
}
