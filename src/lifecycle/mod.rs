//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (binaries):
//!     Load config → Detect runtime env → Initialize subsystems → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C / SIGTERM → broadcast to tasks → drain → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
