//! Service behavior without Databricks credentials.
//!
//! Chat and health keep working; everything that needs the workspace
//! reports unavailable instead of failing opaquely.

mod common;

use std::sync::Arc;

use serde_json::{json, Value};

use pricing_cell::assistant::Assistant;
use pricing_cell::config::{AppConfig, RuntimeEnv};
use pricing_cell::http::AppState;

use common::{spawn_app, TestApp};

async fn spawn_offline() -> TestApp {
    let config = AppConfig::default();
    let assistant = Arc::new(Assistant::from_config(
        &config.chat,
        &config.databricks.ai_endpoint,
        None,
        None,
    ));
    let state = AppState {
        env: RuntimeEnv::Development,
        assistant,
        volume: None,
        pipeline: None,
    };
    spawn_app(&config, state).await
}

#[tokio::test]
async fn health_reports_offline_mode() {
    let app = spawn_offline().await;
    let response = reqwest::get(format!("{}/health", app.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["mode"], "offline");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_offline().await;
    let response = reqwest::get(format!("{}/health", app.base_url))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn chat_answers_without_credentials() {
    let app = spawn_offline().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", app.base_url))
        .json(&json!({ "message": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["source"], "offline");
    assert!(body["reply"].as_str().unwrap().contains("offline mode"));
}

#[tokio::test]
async fn empty_chat_message_is_rejected() {
    let app = spawn_offline().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", app.base_url))
        .json(&json!({ "message": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn summary_and_reset_track_the_conversation() {
    let app = spawn_offline().await;
    let client = reqwest::Client::new();

    for message in ["pricing question", "risk question"] {
        client
            .post(format!("{}/api/chat", app.base_url))
            .json(&json!({ "message": message }))
            .send()
            .await
            .unwrap();
    }

    let summary: Value = client
        .get(format!("{}/api/chat/summary", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(summary["summary"]
        .as_str()
        .unwrap()
        .contains("2 user messages"));

    let reset = client
        .post(format!("{}/api/chat/reset", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(reset.status(), 200);

    let summary: Value = client
        .get(format!("{}/api/chat/summary", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["summary"], "No conversation history available.");
}

#[tokio::test]
async fn databricks_endpoints_report_unavailable() {
    let app = spawn_offline().await;
    let client = reqwest::Client::new();

    let analysis = client
        .post(format!("{}/api/analysis/run", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(analysis.status(), 503);

    let features = client
        .get(format!("{}/api/features", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(features.status(), 503);

    let upload = client
        .post(format!("{}/api/documents/brochure.pdf", app.base_url))
        .body("pdf bytes")
        .send()
        .await
        .unwrap();
    assert_eq!(upload.status(), 503);
}

#[tokio::test]
async fn non_pdf_upload_is_rejected_before_anything_else() {
    let app = spawn_offline().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/documents/notes.txt", app.base_url))
        .body("text")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("PDF"));
}
