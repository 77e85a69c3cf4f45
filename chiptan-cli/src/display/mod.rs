//! Terminal display
//!
//! `TerminalBackend` draws on a crossterm terminal; `FlickerScreen` ties it
//! to the shared renderer and accepts frames from the transmission loop.

pub mod terminal;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use tracing::debug;

use chiptan_core::{FrameSink, Session};
use chiptan_display::{DisplayBackend, DisplayError, QrMatrix, RenderOptions, Renderer};
use chiptan_protocol::FlickerFrame;

pub use terminal::TerminalBackend;

/// Latest window size in (columns, rows), raised by the input task
pub type ResizeSignal = Signal<CriticalSectionRawMutex, (u16, u16)>;

/// The full chipTAN screen on one backend
pub struct FlickerScreen<'a, B: DisplayBackend, Q: QrMatrix + ?Sized> {
    backend: B,
    renderer: Renderer,
    session: &'a Session,
    qr: Option<&'a Q>,
    resized: Option<&'a ResizeSignal>,
}

impl<'a, B: DisplayBackend, Q: QrMatrix + ?Sized> FlickerScreen<'a, B, Q> {
    pub fn new(backend: B, options: RenderOptions, session: &'a Session, qr: Option<&'a Q>) -> Self {
        Self {
            backend,
            renderer: Renderer::new(options),
            session,
            qr,
            resized: None,
        }
    }

    /// Re-layout before the next frame whenever `signal` carries a new size
    pub fn with_resize_signal(mut self, signal: &'a ResizeSignal) -> Self {
        self.resized = Some(signal);
        self
    }

    /// Draw payloads, QR code and exit hint
    ///
    /// Must run before the first frame is shown.
    pub fn draw_static(&mut self) -> Result<u16, DisplayError> {
        self.renderer.draw_static(
            &mut self.backend,
            self.session.hhduc(),
            self.session.bqr(),
            self.qr,
        )
    }

    /// Adopt a new window size and redraw everything
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), DisplayError> {
        debug!("Redrawing for {}x{} cells", cols, rows);
        self.backend.resize(cols, rows);
        self.draw_static()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: DisplayBackend, Q: QrMatrix + ?Sized> FrameSink for FlickerScreen<'_, B, Q> {
    type Error = DisplayError;

    fn show(&mut self, frame: FlickerFrame) -> Result<(), DisplayError> {
        if let Some((cols, rows)) = self.resized.and_then(|signal| signal.try_take()) {
            self.resize(cols, rows)?;
        }
        self.renderer.draw_flicker(&mut self.backend, frame)?;
        self.backend.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::BqrCode;
    use chiptan_display::Tint;
    use chiptan_protocol::TransactionFields;
    use std::collections::BTreeMap;

    /// Keeps only what is currently on screen
    struct GridBackend {
        cols: u16,
        rows: u16,
        text: BTreeMap<(u16, u16), String>,
        pixels: BTreeMap<(u16, u16), bool>,
    }

    impl GridBackend {
        fn new(cols: u16, rows: u16) -> Self {
            Self {
                cols,
                rows,
                text: BTreeMap::new(),
                pixels: BTreeMap::new(),
            }
        }

        fn shows(&self, needle: &str) -> bool {
            self.text.values().any(|t| t.contains(needle))
        }
    }

    impl DisplayBackend for GridBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.text.clear();
            self.pixels.clear();
            Ok(())
        }

        fn draw_text(&mut self, row: u16, col: u16, text: &str, _: Tint) -> Result<(), DisplayError> {
            if row < self.rows && col < self.cols {
                self.text.insert((row, col), text.to_string());
            }
            Ok(())
        }

        fn draw_pixel(&mut self, row: u16, x: u16, white: bool) -> Result<(), DisplayError> {
            if row < self.rows && 2 * x + 1 < self.cols {
                self.pixels.insert((row, x), white);
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn dimensions(&self) -> (u16, u16) {
            (self.cols, self.rows)
        }

        fn resize(&mut self, cols: u16, rows: u16) {
            self.cols = cols;
            self.rows = rows;
        }
    }

    const TOO_SMALL: &str = "window is too small";

    fn golden_session() -> Session {
        Session::prepare(&TransactionFields::new("82112345", "0123456789", "100,00", "")).unwrap()
    }

    #[test]
    fn test_frame_before_static_layout() {
        let session = golden_session();
        let backend = TerminalBackend::new(Vec::new(), 80, 40);
        let mut screen =
            FlickerScreen::<_, BqrCode>::new(backend, RenderOptions::default(), &session, None);
        let frame = FlickerFrame {
            clock: true,
            nibble: 0,
        };
        assert_eq!(screen.show(frame), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_show_flushes_frame() {
        let session = Session::prepare(&TransactionFields::new("1", "", "", "")).unwrap();
        let backend = TerminalBackend::new(Vec::new(), 80, 40);
        let options = RenderOptions {
            colors: true,
            show_qr: false,
        };
        let mut screen = FlickerScreen::<_, BqrCode>::new(backend, options, &session, None);
        screen.draw_static().unwrap();
        let before = screen.backend().output().len();

        let mut code = session.flicker_code();
        screen.show(code.tick()).unwrap();
        assert!(screen.backend().output().len() > before);
    }

    #[test]
    fn test_growing_window_brings_back_qr() {
        let session = golden_session();
        let qr = BqrCode::new(session.bqr()).unwrap();
        let resized = ResizeSignal::new();
        let mut screen = FlickerScreen::new(
            GridBackend::new(40, 20),
            RenderOptions::default(),
            &session,
            Some(&qr),
        )
        .with_resize_signal(&resized);

        screen.draw_static().unwrap();
        let mut code = session.flicker_code();
        screen.show(code.tick()).unwrap();

        let flicker_pixels = screen.backend().pixels.len();
        assert!(screen.backend().shows(TOO_SMALL));

        resized.signal((80, 60));
        screen.show(code.tick()).unwrap();

        let backend = screen.backend();
        assert_eq!(backend.dimensions(), (80, 60));
        assert!(!backend.shows(TOO_SMALL));
        // QR modules, quiet zone included, on top of the flicker field
        assert!(backend.pixels.len() >= flicker_pixels + 29 * 29);
        // signal was consumed; a further frame does not redraw
        assert!(!resized.signaled());
    }

    #[test]
    fn test_shrinking_window_shows_notice() {
        let session = golden_session();
        let qr = BqrCode::new(session.bqr()).unwrap();
        let resized = ResizeSignal::new();
        let mut screen = FlickerScreen::new(
            GridBackend::new(80, 60),
            RenderOptions::default(),
            &session,
            Some(&qr),
        )
        .with_resize_signal(&resized);

        screen.draw_static().unwrap();
        assert!(!screen.backend().shows(TOO_SMALL));

        resized.signal((40, 20));
        let mut code = session.flicker_code();
        screen.show(code.tick()).unwrap();
        assert!(screen.backend().shows(TOO_SMALL));
    }
}
