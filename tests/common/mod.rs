//! Shared test infrastructure: a mock of the Databricks REST surface.
//!
//! Serves the two API families the service talks to:
//! - POST /api/2.0/sql/statements (Statement Execution)
//! - PUT/DELETE /api/2.0/fs/files/{path} (Files)
//!
//! Statement outcomes are scripted per test: each submitted statement
//! consumes the next script entry, defaulting to an empty success.

// Each test binary uses a different subset of this module.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use pricing_cell::config::AppConfig;
use pricing_cell::http::{AppState, HttpServer};
use pricing_cell::lifecycle::Shutdown;

/// A running service instance bound to an ephemeral port.
pub struct TestApp {
    pub base_url: String,
    _shutdown: Shutdown,
}

pub async fn spawn_app(config: &AppConfig, state: AppState) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::with_state(config, state);
    tokio::spawn(async move {
        server.run(listener, receiver).await.unwrap();
    });

    TestApp {
        base_url,
        _shutdown: shutdown,
    }
}

/// Scripted outcome for one submitted statement.
#[derive(Clone)]
pub enum StatementScript {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    },
    Fail {
        message: String,
    },
}

impl StatementScript {
    /// A one-cell result, the shape of COUNT and ai_query selects.
    pub fn single(column: &str, value: &str) -> Self {
        StatementScript::Rows {
            columns: vec![column.to_string()],
            rows: vec![vec![Some(value.to_string())]],
        }
    }

    /// A statement that succeeds without producing rows.
    pub fn ok() -> Self {
        StatementScript::Rows {
            columns: vec![],
            rows: vec![],
        }
    }
}

#[derive(Clone, Default)]
struct MockState {
    statements: Arc<Mutex<Vec<String>>>,
    scripts: Arc<Mutex<VecDeque<StatementScript>>>,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

/// A mock Databricks workspace listening on an ephemeral port.
pub struct MockDatabricks {
    pub base_url: String,
    state: MockState,
}

impl MockDatabricks {
    pub async fn spawn() -> Self {
        let state = MockState::default();
        let router = Router::new()
            .route("/api/2.0/sql/statements", post(submit_statement))
            .route(
                "/api/2.0/fs/files/{*path}",
                put(put_file).delete(delete_file),
            )
            .route("/api/2.0/fs/directories/{*path}", get(list_directory))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, state }
    }

    /// Queue the outcome for the next unscripted statement.
    pub fn script(&self, outcome: StatementScript) {
        self.state.scripts.lock().unwrap().push_back(outcome);
    }

    /// SQL texts received so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.state.statements.lock().unwrap().clone()
    }

    /// Paths of files currently stored.
    pub fn file_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.state.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

/// Scripted outcome for one Messages API call.
#[derive(Clone)]
pub enum AnthropicScript {
    /// A single text content block.
    Reply(String),
    /// A non-2xx status.
    Status(u16),
    /// A response whose content carries no text block.
    NoText,
}

#[derive(Clone, Default)]
struct AnthropicState {
    scripts: Arc<Mutex<VecDeque<AnthropicScript>>>,
    auth_headers: Arc<Mutex<Vec<(String, String)>>>,
}

/// A mock of the Anthropic Messages API on an ephemeral port.
pub struct MockAnthropic {
    pub base_url: String,
    state: AnthropicState,
}

impl MockAnthropic {
    pub async fn spawn() -> Self {
        let state = AnthropicState::default();
        let router = Router::new()
            .route("/v1/messages", post(messages))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, state }
    }

    pub fn script(&self, outcome: AnthropicScript) {
        self.state.scripts.lock().unwrap().push_back(outcome);
    }

    /// (x-api-key, anthropic-version) pairs received so far.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        self.state.auth_headers.lock().unwrap().clone()
    }
}

async fn messages(
    State(state): State<AnthropicState>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    state
        .auth_headers
        .lock()
        .unwrap()
        .push((header("x-api-key"), header("anthropic-version")));

    let script = state
        .scripts
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| AnthropicScript::Reply("ok".to_string()));

    match script {
        AnthropicScript::Reply(text) => Json(json!({
            "content": [ { "type": "text", "text": text } ]
        }))
        .into_response(),
        AnthropicScript::NoText => Json(json!({
            "content": [ { "type": "tool_use", "id": "t1" } ]
        }))
        .into_response(),
        AnthropicScript::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({ "error": { "type": "api_error", "message": "scripted failure" } })),
        )
            .into_response(),
    }
}

async fn submit_statement(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let sql = body["statement"].as_str().unwrap_or_default().to_string();
    let id = {
        let mut statements = state.statements.lock().unwrap();
        statements.push(sql);
        format!("stmt-{}", statements.len())
    };

    let script = state
        .scripts
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(StatementScript::ok);

    let response = match script {
        StatementScript::Rows { columns, rows } => {
            let columns: Vec<Value> = columns.iter().map(|c| json!({ "name": c })).collect();
            json!({
                "statement_id": id,
                "status": { "state": "SUCCEEDED" },
                "manifest": { "schema": { "columns": columns } },
                "result": { "data_array": rows }
            })
        }
        StatementScript::Fail { message } => json!({
            "statement_id": id,
            "status": { "state": "FAILED", "error": { "message": message } }
        }),
    };
    Json(response)
}

async fn put_file(
    State(state): State<MockState>,
    Path(path): Path<String>,
    body: Bytes,
) -> StatusCode {
    state.files.lock().unwrap().insert(path, body.to_vec());
    StatusCode::NO_CONTENT
}

async fn list_directory(
    State(state): State<MockState>,
    Path(path): Path<String>,
) -> Json<Value> {
    let prefix = format!("{path}/");
    let contents: Vec<Value> = state
        .files
        .lock()
        .unwrap()
        .keys()
        .filter_map(|stored| stored.strip_prefix(&prefix))
        .map(|name| json!({ "name": name, "is_directory": false }))
        .collect();
    Json(json!({ "contents": contents }))
}

async fn delete_file(
    State(state): State<MockState>,
    Path(path): Path<String>,
) -> impl IntoResponse {
    if state.files.lock().unwrap().remove(&path).is_some() {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error_code": "NOT_FOUND", "message": "no such file" })),
        )
            .into_response()
    }
}
