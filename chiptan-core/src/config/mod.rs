//! Configuration types

pub mod types;

pub use types::{ConfigError, FlickerConfig, DEFAULT_TICK_MS, MAX_TICK_MS, MIN_TICK_MS};
