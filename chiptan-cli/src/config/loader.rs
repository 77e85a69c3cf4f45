//! Configuration file loading
//!
//! Reads `chiptan.toml` from the working directory or an explicit path.
//! Falls back to the embedded defaults if no file is present.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::types::CliConfig;

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "chiptan.toml";

/// Embedded default configuration (validated by build.rs)
pub const EMBEDDED_CONFIG: &str = include_str!("../../chiptan.toml");

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid configuration in {origin}: {source}")]
    Parse {
        origin: String,
        source: toml::de::Error,
    },

    #[error("invalid configuration in {origin}: {source}")]
    Invalid {
        origin: String,
        source: chiptan_core::ConfigError,
    },
}

/// Load the configuration
///
/// An explicit `path` must exist. Without one, `chiptan.toml` in the
/// working directory is used if present, else the embedded defaults.
pub fn load(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    match path {
        Some(path) => load_file(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.is_file() {
                load_file(default)
            } else {
                debug!("No {} found, using embedded defaults", DEFAULT_CONFIG_PATH);
                parse(EMBEDDED_CONFIG, "embedded defaults")
            }
        }
    }
}

fn load_file(path: &Path) -> Result<CliConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes of TOML from {}", text.len(), path.display());
    parse(&text, &path.display().to_string())
}

/// Parse and validate TOML configuration text
///
/// `origin` names the source in error messages.
pub fn parse(text: &str, origin: &str) -> Result<CliConfig, ConfigError> {
    let config: CliConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    config.validate().map_err(|source| ConfigError::Invalid {
        origin: origin.to_string(),
        source,
    })?;

    Ok(config)
}
