//! Router construction and the serve loop.

use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::assistant::Assistant;
use crate::config::{AppConfig, RuntimeEnv};
use crate::http::{handlers, request};
use crate::pipeline::AnalysisPipeline;
use crate::volume::VolumeClient;
use crate::warehouse::WarehouseClient;

/// Application state injected into handlers.
///
/// Databricks-backed members are None when the workspace is not
/// authenticated; their endpoints then answer 503 while chat and health
/// keep working.
#[derive(Clone)]
pub struct AppState {
    pub env: RuntimeEnv,
    pub assistant: Arc<Assistant>,
    pub volume: Option<Arc<VolumeClient>>,
    pub pipeline: Option<Arc<AnalysisPipeline>>,
}

/// HTTP server for the pricing cell API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Wire up clients, assistant, and router from configuration.
    pub fn new(config: AppConfig, env: RuntimeEnv, anthropic_api_key: Option<String>) -> Self {
        let warehouse = match WarehouseClient::from_config(&config.databricks) {
            Ok(client) => Some(Arc::new(client)),
            Err(_) => {
                tracing::warn!("No Databricks credentials; analysis and documents are offline");
                None
            }
        };
        let volume = VolumeClient::from_config(&config.databricks)
            .ok()
            .map(Arc::new);
        let pipeline = warehouse
            .clone()
            .map(|w| Arc::new(AnalysisPipeline::new(w, config.clone())));

        let assistant = Arc::new(Assistant::from_config(
            &config.chat,
            &config.databricks.ai_endpoint,
            warehouse,
            anthropic_api_key,
        ));

        let state = AppState {
            env,
            assistant,
            volume,
            pipeline,
        };

        Self {
            router: Self::build_router(&config, state),
        }
    }

    /// A server over a prebuilt state. Tests use this to inject mocks.
    pub fn with_state(config: &AppConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(config, state),
        }
    }

    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/chat", post(handlers::chat))
            .route("/api/chat/reset", post(handlers::chat_reset))
            .route("/api/chat/summary", get(handlers::chat_summary))
            .route("/api/documents", get(handlers::list_documents))
            .route(
                "/api/documents/{filename}",
                post(handlers::upload_document).delete(handlers::delete_document),
            )
            .route("/api/analysis/run", post(handlers::run_analysis))
            .route("/api/features", get(handlers::features))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
            .layer(middleware::from_fn(request::request_id))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until the shutdown channel fires, then drain gracefully.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
