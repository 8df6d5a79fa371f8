//! Domain errors rendered as JSON API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::pipeline::PipelineError;
use crate::volume::VolumeError;

/// An error response: a status code and a user-facing message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// The endpoint needs Databricks and the service has no credentials.
    pub fn offline() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Databricks connection not configured; set DATABRICKS_HOST and DATABRICKS_TOKEN",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let status = match &err {
            PipelineError::Offline => StatusCode::SERVICE_UNAVAILABLE,
            PipelineError::EndpointMissing { .. } | PipelineError::NoDocumentsParsed => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PipelineError::Warehouse(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl From<VolumeError> for ApiError {
    fn from(err: VolumeError) -> Self {
        let status = match &err {
            VolumeError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            VolumeError::InvalidFilename(_) => StatusCode::BAD_REQUEST,
            VolumeError::Api { status: 404, .. } => StatusCode::NOT_FOUND,
            VolumeError::Http(_) | VolumeError::Api { .. } => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}
