//! Host configuration types

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use chiptan_core::FlickerConfig;
use chiptan_display::RenderOptions;

/// Complete host configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub flicker: FlickerConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Check value ranges after file loading and overrides
    pub fn validate(&self) -> Result<(), chiptan_core::ConfigError> {
        self.flicker.validate()
    }
}

/// `[display]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub colors: bool,
    pub show_qr: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            show_qr: true,
        }
    }
}

impl From<DisplayConfig> for RenderOptions {
    fn from(config: DisplayConfig) -> Self {
        RenderOptions {
            colors: config.colors,
            show_qr: config.show_qr,
        }
    }
}

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Write logs here instead of stderr
    pub file: Option<PathBuf>,
}
