//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment variable overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the service starts with no file at all
//! - Environment variables win over file values (deployment overrides)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod runtime_env;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use runtime_env::RuntimeEnv;
pub use schema::AppConfig;
pub use schema::ChatConfig;
pub use schema::DatabricksConfig;
pub use schema::ServerConfig;
pub use schema::SupervisorConfig;
pub use schema::TableConfig;
