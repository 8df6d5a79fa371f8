//! Brochure analysis pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/analysis/run
//!     → statements.rs (build the three CREATE TABLE statements)
//!     → runner.rs
//!         stage 1: parse brochures from the volume into the parsed table
//!         stage 2: preflight the AI endpoint, then fill the response table
//!         stage 3: project JSON responses into the pricing features table
//!     → features.rs (read back the latest extracted row)
//! ```
//!
//! # Design Decisions
//! - Each stage re-creates its table; reruns are idempotent
//! - Row counts are verified after stages 1 and 2; an empty parse is a
//!   reported condition, not silent success
//! - A missing serving endpoint maps to a distinct error with a config
//!   hint, since it is the most common deployment mistake

pub mod features;
pub mod runner;
pub mod statements;

pub use features::PricingFeatures;
pub use runner::{AnalysisPipeline, PipelineError, PipelineReport};
