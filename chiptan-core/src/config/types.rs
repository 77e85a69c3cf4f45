//! Configuration type definitions
//!
//! These types represent the transmission settings shared by every
//! front end. Hosts usually fill them from a TOML file.

use core::fmt;

use embassy_time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tick period (ms)
pub const DEFAULT_TICK_MS: u32 = 50;

/// Fastest accepted tick period (ms)
pub const MIN_TICK_MS: u32 = 10;

/// Slowest accepted tick period (ms)
pub const MAX_TICK_MS: u32 = 1000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period outside `MIN_TICK_MS..=MAX_TICK_MS`
    TickOutOfRange { tick_ms: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TickOutOfRange { tick_ms } => write!(
                f,
                "tick period of {tick_ms} ms is outside {MIN_TICK_MS}..={MAX_TICK_MS} ms"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Flicker transmission configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FlickerConfig {
    /// Time between two frames in milliseconds
    pub tick_ms: u32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl FlickerConfig {
    /// Check the tick period against the accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&self.tick_ms) {
            return Err(ConfigError::TickOutOfRange {
                tick_ms: self.tick_ms,
            });
        }
        Ok(())
    }

    /// Tick period as a timer duration
    pub fn period(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }
}
