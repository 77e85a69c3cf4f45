//! Configuration loading and parsing
//!
//! Loads configuration from a TOML file or the embedded defaults, then
//! applies command line overrides.

pub mod loader;
pub mod types;

pub use loader::load;
pub use types::{CliConfig, LogLevel, LoggingConfig};
