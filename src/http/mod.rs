//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! request
//!     → request.rs (assign x-request-id)
//!     → server.rs (router, timeout, body limit, trace layers)
//!     → handlers.rs
//!         /health            → health::HealthReport
//!         /api/chat*         → assistant::Assistant
//!         /api/documents/*   → volume::VolumeClient
//!         /api/analysis/run  → pipeline::AnalysisPipeline
//!         /api/features      → pipeline latest row
//!     → error.rs (domain errors to JSON status responses)
//! ```
//!
//! # Design Decisions
//! - Chat handlers never return 5xx; a failed live completion already
//!   degraded to an offline answer inside the assistant
//! - Offline mode maps to 503 only on endpoints that require Databricks
//! - One shared request timeout sized for pipeline runs

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
