//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, PORT override)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to the handler state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no ambient global
//! - All fields have defaults to allow minimal (or absent) configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::GatewayConfig;
pub use schema::{CorsConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig};
