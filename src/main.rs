//! HTTP service entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;

use pricing_cell::config::{self, RuntimeEnv};
use pricing_cell::http::HttpServer;
use pricing_cell::lifecycle::Shutdown;
use pricing_cell::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = RuntimeEnv::detect();
    observability::logging::init(env.debug_enabled());

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_config(config_path.as_deref())?;

    tracing::info!(
        environment = env.as_str(),
        port = config.server.port,
        authenticated = config.databricks.is_authenticated(),
        "Starting pricing cell service"
    );

    let addr = SocketAddr::new(env.bind_host(), config.server.port);
    let listener = TcpListener::bind(addr).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();
    let server = HttpServer::new(config, env, anthropic_api_key);
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
