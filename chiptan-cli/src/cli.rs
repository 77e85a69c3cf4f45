//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::{CliConfig, LogLevel};
use crate::input::OwnedFields;

/// Generate chipTAN HHDuc/BQR payloads and show a live flicker code
#[derive(Debug, Parser)]
#[command(name = "chiptan", version, about)]
pub struct Cli {
    /// Configuration file [default: ./chiptan.toml, else built-in defaults]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Flicker tick period in milliseconds (10-1000)
    #[arg(short, long, value_name = "MS")]
    pub tick_ms: Option<u32>,

    /// Do not draw the BQR matrix
    #[arg(long)]
    pub no_qr: bool,

    /// Print hex segments without colours
    #[arg(long)]
    pub no_colors: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Start code; prompts for all fields when omitted
    #[arg(short, long)]
    pub startcode: Option<String>,

    /// First data element
    #[arg(long, default_value = "", hide_default_value = true)]
    pub de1: String,

    /// Second data element
    #[arg(long, default_value = "", hide_default_value = true)]
    pub de2: String,

    /// Third data element
    #[arg(long, default_value = "", hide_default_value = true)]
    pub de3: String,
}

impl Cli {
    /// Overlay command line switches on the loaded configuration
    pub fn apply(&self, config: &mut CliConfig) {
        if let Some(tick_ms) = self.tick_ms {
            config.flicker.tick_ms = tick_ms;
        }
        if self.no_qr {
            config.display.show_qr = false;
        }
        if self.no_colors {
            config.display.colors = false;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }

    /// Transaction fields given on the command line, if any
    ///
    /// `None` means the user should be prompted.
    pub fn fields(&self) -> Option<OwnedFields> {
        self.startcode.as_ref().map(|startcode| OwnedFields {
            startcode: startcode.clone(),
            de1: self.de1.clone(),
            de2: self.de2.clone(),
            de3: self.de3.clone(),
        })
    }
}
