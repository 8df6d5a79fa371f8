//! SQL warehouse access subsystem.
//!
//! # Data Flow
//! ```text
//! caller SQL text
//!     → client.rs (submit to the Statement Execution API)
//!     → client.rs (poll until a terminal state)
//!     → statement.rs (decode manifest schema + data_array)
//!     → StatementResult (columns + string rows)
//! ```
//!
//! # Design Decisions
//! - The warehouse is reached over REST, never a native driver
//! - A client cannot exist without a token; callers treat construction
//!   failure as offline mode
//! - All cell values decode to optional strings; numeric interpretation
//!   happens at the call site

pub mod client;
pub mod statement;

pub use client::{WarehouseClient, WarehouseError};
pub use statement::StatementResult;
