//! Pricing cell service for fixed-annuity brochure analysis.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               PRICING CELL                    │
//!                    │                                               │
//!   HTTP Request     │  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ assistant │──▶│ warehouse │──┼──▶ Databricks
//!                    │  │ server │   │  (chat)   │   │ (ai_query)│  │    SQL API
//!                    │  └───┬────┘   └───────────┘   └───────────┘  │
//!                    │      │                                       │
//!                    │      │        ┌───────────┐   ┌───────────┐  │
//!                    │      ├───────▶│ pipeline  │──▶│ warehouse │  │
//!                    │      │        │ (3 stages)│   └───────────┘  │
//!                    │      │        └───────────┘                  │
//!                    │      │        ┌───────────┐                  │
//!                    │      └───────▶│  volume   │──────────────────┼──▶ Files API
//!                    │               │ (uploads) │                  │
//!                    │               └───────────┘                  │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns          │ │
//!                    │  │  config   health   lifecycle             │ │
//!                    │  │  observability   supervisor              │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Two binaries share this library: `pricing-cell` (the HTTP service)
//! and `cell-supervisor` (a restart loop that keeps the service alive).

// Core subsystems
pub mod assistant;
pub mod config;
pub mod http;
pub mod pipeline;

// Databricks clients
pub mod volume;
pub mod warehouse;

// Cross-cutting concerns
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod supervisor;
