//! Flicker task
//!
//! Runs the transmission loop against the terminal until a key is pressed.
//! Window size changes seen on the way are handed to the screen.

use crossterm::event::{Event, EventStream, KeyEventKind};
use embassy_time::Duration;
use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use chiptan_core::{transmit, FrameSink, Session, TransmitStats};

use crate::display::ResizeSignal;

/// Resolve on the next key press
///
/// Resize events are forwarded to `resized`; mouse and key release events
/// are ignored. A broken or closed input stream counts as a request to stop.
pub async fn key_pressed<S>(events: &mut S, resized: &ResizeSignal)
where
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                debug!("Key pressed: {:?}", key.code);
                return;
            }
            Ok(Event::Resize(cols, rows)) => {
                debug!("Window resized to {}x{}", cols, rows);
                resized.signal((cols, rows));
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Terminal input failed: {}", e);
                return;
            }
        }
    }
    debug!("Terminal input closed");
}

/// Flicker `session` into `sink` until a key is pressed
pub async fn run_flicker<S: FrameSink>(
    session: &Session,
    sink: &mut S,
    period: Duration,
    resized: &ResizeSignal,
) -> Result<TransmitStats, S::Error> {
    let mut events = EventStream::new();
    let mut code = session.flicker_code();

    transmit(&mut code, sink, key_pressed(&mut events, resized), period).await
}
