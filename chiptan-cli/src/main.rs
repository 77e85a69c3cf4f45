//! chiptan - Terminal chipTAN Generator
//!
//! Encodes a start code and up to three data elements into an HHDuc, wraps
//! it into a BQR payload and shows both, the BQR matrix and a live flicker
//! code until a key is pressed.
//!
//! Runs on the embassy executor so the flicker loop shares its timer-driven
//! transmission code with embedded displays.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use embassy_executor::Spawner;
use tracing::{debug, info};

use chiptan_core::Session;

use crate::cli::Cli;
use crate::display::{FlickerScreen, ResizeSignal, TerminalBackend};
use crate::input::prompt_fields;
use crate::qr::BqrCode;

mod cli;
mod config;
mod display;
mod input;
mod logging;
mod qr;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("chiptan: {:#}", e);
            1
        }
    };
    // The executor never returns on its own
    std::process::exit(code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // 1. Configuration: file or embedded defaults, then command line
    let mut config = config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate().context("invalid command line option")?;

    logging::init_logging(&config.logging)?;
    info!("chiptan {} starting", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    // 2. Transaction fields
    let fields = match cli.fields() {
        Some(fields) => fields,
        None => prompt_fields(&mut io::stdin().lock(), &mut io::stdout())
            .context("failed to read transaction fields")?,
    };

    // 3. Encode everything before the screen is touched
    let session = Session::prepare(&fields.as_fields()).context("cannot encode transaction")?;
    info!(
        hhduc_len = session.hhduc().len(),
        bqr_len = session.bqr().len(),
        "Payloads encoded"
    );

    let qr = if config.display.show_qr {
        Some(BqrCode::new(session.bqr())?)
    } else {
        None
    };

    let period = config.flicker.period();
    info!(
        "Flickering {} frames per cycle every {} ms",
        session.flicker_code().cycle_len(),
        period.as_millis()
    );

    // 4. Screen and flicker loop; the terminal is restored when `screen` drops
    let resized = ResizeSignal::new();
    let stats = {
        let backend = TerminalBackend::stdout().context("failed to set up terminal")?;
        let mut screen =
            FlickerScreen::new(backend, config.display.into(), &session, qr.as_ref())
                .with_resize_signal(&resized);
        screen.draw_static().context("failed to draw screen")?;

        tasks::run_flicker(&session, &mut screen, period, &resized).await
    };
    let stats = stats.context("flicker output failed")?;

    info!(
        frames = stats.frames,
        cycles = stats.cycles,
        "Flicker stopped"
    );
    Ok(())
}
