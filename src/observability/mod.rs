//! Observability subsystem.
//!
//! Structured logging via `tracing`. The request ID generated in the HTTP
//! layer flows through all log events for a request.

pub mod logging;
