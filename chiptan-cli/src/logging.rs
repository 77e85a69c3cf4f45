//! Structured logging setup
//!
//! `RUST_LOG` wins over the configured level. Output goes to stderr unless
//! a log file is configured. Stderr output is dropped while the terminal
//! shows the flicker screen; a log file keeps receiving everything.

use std::fs::OpenOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

static STDERR_MUTED: AtomicBool = AtomicBool::new(false);

/// Suppresses stderr log output until dropped
#[must_use]
pub struct StderrMute {
    _private: (),
}

impl StderrMute {
    pub fn new() -> Self {
        STDERR_MUTED.store(true, Ordering::Relaxed);
        Self { _private: () }
    }
}

impl Drop for StderrMute {
    fn drop(&mut self) {
        STDERR_MUTED.store(false, Ordering::Relaxed);
    }
}

fn stderr_enabled() -> bool {
    !STDERR_MUTED.load(Ordering::Relaxed)
}

/// Install the global subscriber
///
/// Calling this again after a subscriber is installed is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let result = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr.with_filter(|_| stderr_enabled())),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
    Ok(())
}
