//! API route handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::assistant::{ContextData, ReplySource};
use crate::health::HealthReport;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::pipeline::{PipelineError, PipelineReport, PricingFeatures};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<ContextData>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub source: ReplySource,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::current(state.env, state.assistant.is_online()))
}

/// POST /api/chat. Always answers; a dead backend degrades to offline.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    let outcome = state.assistant.respond(message, body.context.as_ref()).await;
    Ok(Json(ChatResponse {
        reply: outcome.reply,
        source: outcome.source,
    }))
}

pub async fn chat_reset(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.assistant.reset().await;
    Json(json!({ "status": "reset" }))
}

pub async fn chat_summary(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "summary": state.assistant.summary().await }))
}

/// GET /api/documents. Names of the brochures currently in the volume.
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let volume = state.volume.as_ref().ok_or_else(ApiError::offline)?;
    let files = volume.list().await?;
    Ok(Json(json!({ "files": files })))
}

/// POST /api/documents/{filename}. The raw body is the file content.
pub async fn upload_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    require_pdf(&filename)?;
    if body.is_empty() {
        return Err(ApiError::bad_request("file content must not be empty"));
    }

    let volume = state.volume.as_ref().ok_or_else(ApiError::offline)?;
    let path = volume.upload(&filename, body.to_vec()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "filename": filename, "path": path })),
    ))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_pdf(&filename)?;
    let volume = state.volume.as_ref().ok_or_else(ApiError::offline)?;
    volume.delete(&filename).await?;
    Ok(Json(json!({ "status": "deleted", "filename": filename })))
}

/// POST /api/analysis/run. Synchronous; the route timeout is sized for it.
pub async fn run_analysis(
    State(state): State<AppState>,
) -> Result<Json<PipelineReport>, ApiError> {
    let pipeline = state.pipeline.as_ref().ok_or(PipelineError::Offline)?;
    let report = pipeline.run().await?;
    Ok(Json(report))
}

pub async fn features(
    State(state): State<AppState>,
) -> Result<Json<PricingFeatures>, ApiError> {
    let pipeline = state.pipeline.as_ref().ok_or(PipelineError::Offline)?;
    match pipeline.latest_features().await? {
        Some(features) => Ok(Json(features)),
        None => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "no pricing features extracted yet; run the analysis first",
        )),
    }
}

fn require_pdf(filename: &str) -> Result<(), ApiError> {
    if filename.to_lowercase().ends_with(".pdf") {
        Ok(())
    } else {
        Err(ApiError::bad_request("only PDF brochures are accepted"))
    }
}
