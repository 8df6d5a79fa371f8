//! Child process supervision subsystem.
//!
//! # Data Flow
//! ```text
//! cell-supervisor binary
//!     → runner.rs (spawn child, wait for exit)
//!     → policy.rs (how long to wait, whether to try again)
//!     → runner.rs (sleep, respawn)
//!     → repeat until shutdown signal or restart cap
//! ```
//!
//! # Design Decisions
//! - Any exit restarts the child: crash and clean exit are treated alike
//! - Default is a fixed 5 second delay with no cap
//! - Exponential backoff with a ceiling is opt-in, to damp restart storms
//!   when the child fails persistently at startup
//! - A child that stays up long enough resets the failure streak

pub mod policy;
pub mod runner;

pub use policy::RestartPolicy;
pub use runner::{Supervisor, SupervisorError};
