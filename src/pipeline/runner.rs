//! Staged execution of the brochure analysis pipeline.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;
use crate::pipeline::{features::PricingFeatures, statements};
use crate::warehouse::{WarehouseClient, WarehouseError};

/// Substrings the API uses to signal a missing serving endpoint.
const ENDPOINT_MISSING_MARKERS: &[&str] = &["does not exist", "RESOURCE_DOES_NOT_EXIST"];

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("analysis requires an authenticated Databricks connection")]
    Offline,

    #[error("serving endpoint '{endpoint}' does not exist; set DATABRICKS_AI_ENDPOINT to an endpoint available in this workspace")]
    EndpointMissing { endpoint: String },

    #[error("no documents were parsed; upload at least one brochure before running analysis")]
    NoDocumentsParsed,

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

/// Outcome of a full pipeline run.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub parsed_rows: u64,
    pub response_rows: u64,
    pub message: String,
}

/// Runs the three table-building stages against the warehouse.
pub struct AnalysisPipeline {
    warehouse: Arc<WarehouseClient>,
    config: AppConfig,
}

impl AnalysisPipeline {
    pub fn new(warehouse: Arc<WarehouseClient>, config: AppConfig) -> Self {
        Self { warehouse, config }
    }

    /// Run all stages in order and report row counts.
    ///
    /// Stops at the first stage that fails; earlier tables are left in
    /// place so a rerun picks up from scratch cleanly.
    pub async fn run(&self) -> Result<PipelineReport, PipelineError> {
        info!("analysis stage 1: parsing brochures");
        self.warehouse
            .execute(&statements::parse_statement(&self.config))
            .await?;

        let parsed_table = self.config.qualified_table(&self.config.tables.parsed);
        let parsed_rows = self.count_rows(&parsed_table).await?;
        if parsed_rows == 0 {
            return Err(PipelineError::NoDocumentsParsed);
        }
        info!(parsed_rows, "analysis stage 1 complete");

        self.preflight_endpoint().await?;

        info!("analysis stage 2: querying serving endpoint");
        self.warehouse
            .execute(&statements::responses_statement(&self.config))
            .await?;

        let response_table = self
            .config
            .qualified_table(&self.config.tables.endpoint_response);
        let response_rows = self.count_rows(&response_table).await?;
        info!(response_rows, "analysis stage 2 complete");

        info!("analysis stage 3: extracting pricing features");
        self.warehouse
            .execute(&statements::features_statement(&self.config))
            .await?;
        info!("analysis stage 3 complete");

        Ok(PipelineReport {
            parsed_rows,
            response_rows,
            message: format!(
                "analysis complete: {parsed_rows} document(s) parsed, {response_rows} endpoint response(s)"
            ),
        })
    }

    /// Fetch the most recently extracted feature row.
    pub async fn latest_features(&self) -> Result<Option<PricingFeatures>, PipelineError> {
        let result = self
            .warehouse
            .execute(&statements::latest_features_statement(&self.config))
            .await?;
        Ok(PricingFeatures::from_result(&result))
    }

    /// Prove the serving endpoint answers before paying for a full run.
    async fn preflight_endpoint(&self) -> Result<(), PipelineError> {
        let endpoint = &self.config.databricks.ai_endpoint;
        let sql = statements::endpoint_preflight_statement(endpoint);
        match self.warehouse.execute(&sql).await {
            Ok(_) => Ok(()),
            Err(WarehouseError::Statement { message, .. })
                if indicates_missing_endpoint(&message) =>
            {
                Err(PipelineError::EndpointMissing {
                    endpoint: endpoint.clone(),
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn count_rows(&self, qualified_table: &str) -> Result<u64, PipelineError> {
        let result = self
            .warehouse
            .execute(&statements::count_statement(qualified_table))
            .await?;
        Ok(result
            .first_value()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0))
    }
}

fn indicates_missing_endpoint(message: &str) -> bool {
    ENDPOINT_MISSING_MARKERS.iter().any(|m| message.contains(m))
}
