//! Screen rendering
//!
//! Draws the static payload view once and repaints only the flicker field
//! on every frame.

use core::fmt::Write;

use heapless::String;

use chiptan_protocol::FlickerFrame;

use crate::backend::{DisplayBackend, DisplayError, Tint};
use crate::layout::{
    bqr_segments, flicker_pixel, hex_bytes_per_row, hex_rows, qr_fits, qr_pixel, qr_side, QrMatrix,
    Segment, FLICKER_HEIGHT, FLICKER_WIDTH,
};

const HHDUC_LABEL: &str = "HHDuc: ";
const BQR_LABEL: &str = "BQR:   ";
const LABEL_LEN: u16 = 7;

const EXIT_HINT: &str = "Press any key to exit.";
const QR_TOO_SMALL: &str = "Cannot display chipTAN QR code because the window is too small.";

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderOptions {
    /// Colour hex segments by role
    pub colors: bool,
    /// Draw the BQR matrix
    pub show_qr: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colors: true,
            show_qr: true,
        }
    }
}

/// Composes the chipTAN screen on a backend
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    /// First row of the flicker field, known after `draw_static`
    flicker_row: Option<u16>,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            flicker_row: None,
        }
    }

    /// Row the flicker field starts on, once the static content is drawn
    pub fn flicker_row(&self) -> Option<u16> {
        self.flicker_row
    }

    /// Clear the display and draw everything except the flicker field
    ///
    /// Returns the number of rows used.
    pub fn draw_static<B, Q>(
        &mut self,
        backend: &mut B,
        hhduc: &[u8],
        bqr: &[u8],
        qr: Option<&Q>,
    ) -> Result<u16, DisplayError>
    where
        B: DisplayBackend,
        Q: QrMatrix + ?Sized,
    {
        let (cols, rows) = backend.dimensions();
        backend.clear()?;

        let mut row = 0;
        let data = [Segment {
            tint: Tint::Data,
            range: 0..hhduc.len(),
        }];
        row += self.draw_hex(backend, row, HHDUC_LABEL, hhduc, &data, cols)?;
        row += self.draw_hex(backend, row, BQR_LABEL, bqr, &bqr_segments(bqr.len()), cols)?;
        row += 1;

        self.flicker_row = Some(row);
        row += FLICKER_HEIGHT + 1;

        if self.options.show_qr {
            if let Some(qr) = qr {
                let width = qr.width();
                if qr_fits(width, cols, rows.saturating_sub(row)) {
                    let side = qr_side(width);
                    for y in 0..side {
                        for x in 0..side {
                            backend.draw_pixel(row + y as u16, x as u16, qr_pixel(qr, x, y))?;
                        }
                    }
                    row += side as u16;
                } else {
                    backend.draw_text(row, 0, QR_TOO_SMALL, Tint::Plain)?;
                    row += 1;
                }
                row += 1;
            }
        }

        backend.draw_text(row, 0, EXIT_HINT, Tint::Plain)?;
        row += 1;

        backend.flush()?;
        Ok(row)
    }

    /// Repaint the flicker field for `frame`
    ///
    /// Does not flush; the caller decides when the frame becomes visible.
    pub fn draw_flicker<B: DisplayBackend>(
        &self,
        backend: &mut B,
        frame: FlickerFrame,
    ) -> Result<(), DisplayError> {
        let top = self.flicker_row.ok_or(DisplayError::NotInitialized)?;
        for y in 0..FLICKER_HEIGHT {
            for x in 0..FLICKER_WIDTH {
                backend.draw_pixel(top + y, x, flicker_pixel(&frame, x, y))?;
            }
        }
        Ok(())
    }

    /// Hex dump of `bytes` after `label`, wrapped to `cols`
    fn draw_hex<B: DisplayBackend>(
        &self,
        backend: &mut B,
        row: u16,
        label: &str,
        bytes: &[u8],
        segments: &[Segment],
        cols: u16,
    ) -> Result<u16, DisplayError> {
        backend.draw_text(row, 0, label, Tint::Plain)?;

        let per_row = hex_bytes_per_row(cols, LABEL_LEN);
        for segment in segments {
            let tint = if self.options.colors {
                segment.tint
            } else {
                Tint::Plain
            };
            for i in segment.range.clone() {
                let mut hex: String<2> = String::new();
                let _ = write!(hex, "{:02x}", bytes[i]);
                let line = row + (i / per_row) as u16;
                let col = LABEL_LEN + 2 * (i % per_row) as u16;
                backend.draw_text(line, col, &hex, tint)?;
            }
        }

        Ok(hex_rows(bytes.len(), cols, LABEL_LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::string::String as StdString;

    /// Records text and pixels by position
    struct MockBackend {
        cols: u16,
        rows: u16,
        text: BTreeMap<(u16, u16), (StdString, Tint)>,
        pixels: BTreeMap<(u16, u16), bool>,
        flushes: usize,
    }

    impl MockBackend {
        fn new(cols: u16, rows: u16) -> Self {
            Self {
                cols,
                rows,
                text: BTreeMap::new(),
                pixels: BTreeMap::new(),
                flushes: 0,
            }
        }

        fn text_at(&self, row: u16, col: u16) -> Option<&str> {
            self.text.get(&(row, col)).map(|(s, _)| s.as_str())
        }

        fn tint_at(&self, row: u16, col: u16) -> Option<Tint> {
            self.text.get(&(row, col)).map(|(_, t)| *t)
        }
    }

    impl DisplayBackend for MockBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.text.clear();
            self.pixels.clear();
            Ok(())
        }

        fn draw_text(
            &mut self,
            row: u16,
            col: u16,
            text: &str,
            tint: Tint,
        ) -> Result<(), DisplayError> {
            self.text.insert((row, col), (text.to_string(), tint));
            Ok(())
        }

        fn draw_pixel(&mut self, row: u16, x: u16, white: bool) -> Result<(), DisplayError> {
            self.pixels.insert((row, x), white);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u16, u16) {
            (self.cols, self.rows)
        }
    }

    struct Solid(usize);

    impl QrMatrix for Solid {
        fn width(&self) -> usize {
            self.0
        }

        fn is_dark(&self, _x: usize, _y: usize) -> bool {
            true
        }
    }

    const HHDUC: [u8; 5] = [0x04, 0xC1, 0x01, 0x31, 0x3A];
    const BQR: [u8; 10] = [0x44, 0x4B, 0x0A, 0x4F, 0x85, 0x4A, 0x75, 0x71, 0x12, 0xB2];

    #[test]
    fn test_flicker_requires_static_layout() {
        let renderer = Renderer::new(RenderOptions::default());
        let mut backend = MockBackend::new(80, 60);
        let frame = FlickerFrame {
            clock: true,
            nibble: 0xF,
        };
        assert_eq!(
            renderer.draw_flicker(&mut backend, frame),
            Err(DisplayError::NotInitialized)
        );
    }

    #[test]
    fn test_static_layout() {
        let mut renderer = Renderer::new(RenderOptions::default());
        let mut backend = MockBackend::new(80, 60);
        let rows = renderer
            .draw_static(&mut backend, &HHDUC, &BQR, Some(&Solid(21)))
            .unwrap();

        assert_eq!(backend.text_at(0, 0), Some("HHDuc: "));
        assert_eq!(backend.text_at(0, 7), Some("04"));
        assert_eq!(backend.text_at(0, 15), Some("3a"));
        assert_eq!(backend.text_at(1, 0), Some("BQR:   "));
        assert_eq!(backend.tint_at(1, 7), Some(Tint::Magic));
        assert_eq!(backend.tint_at(1, 11), Some(Tint::Ams));
        assert_eq!(backend.tint_at(1, 13), Some(Tint::Data));
        assert_eq!(backend.tint_at(1, 23), Some(Tint::Checksum));

        // two hex rows, a gap, then the flicker field
        assert_eq!(renderer.flicker_row(), Some(3));

        // QR starts after the flicker field and a gap; quiet zone is white
        let qr_top = 3 + FLICKER_HEIGHT + 1;
        assert_eq!(backend.pixels.get(&(qr_top, 0)), Some(&true));
        assert_eq!(backend.pixels.get(&(qr_top + 4, 4)), Some(&false));

        let hint_row = qr_top + 29 + 1;
        assert_eq!(backend.text_at(hint_row, 0), Some(EXIT_HINT));
        assert_eq!(rows, hint_row + 1);
        assert_eq!(backend.flushes, 1);
    }

    #[test]
    fn test_plain_when_colors_disabled() {
        let mut renderer = Renderer::new(RenderOptions {
            colors: false,
            show_qr: false,
        });
        let mut backend = MockBackend::new(80, 60);
        renderer
            .draw_static::<_, Solid>(&mut backend, &HHDUC, &BQR, None)
            .unwrap();
        assert_eq!(backend.tint_at(1, 7), Some(Tint::Plain));
        assert_eq!(backend.tint_at(0, 7), Some(Tint::Plain));
        assert_eq!(backend.text_at(3 + FLICKER_HEIGHT + 1, 0), Some(EXIT_HINT));
    }

    #[test]
    fn test_small_window_shows_notice() {
        let mut renderer = Renderer::new(RenderOptions::default());
        let mut backend = MockBackend::new(40, 20);
        renderer
            .draw_static(&mut backend, &HHDUC, &BQR, Some(&Solid(21)))
            .unwrap();

        let notice_row = renderer.flicker_row().unwrap() + FLICKER_HEIGHT + 1;
        assert_eq!(backend.text_at(notice_row, 0), Some(QR_TOO_SMALL));
        assert!(backend.pixels.is_empty());
    }

    #[test]
    fn test_hex_wraps_to_width() {
        let mut renderer = Renderer::new(RenderOptions::default());
        // 7 label columns + 4 bytes per row
        let mut backend = MockBackend::new(15, 60);
        renderer
            .draw_static::<_, Solid>(&mut backend, &HHDUC, &BQR, None)
            .unwrap();

        assert_eq!(backend.text_at(0, 7), Some("04"));
        assert_eq!(backend.text_at(1, 7), Some("3a"));
        // BQR: 10 bytes over 3 rows, starting on row 2
        assert_eq!(backend.text_at(2, 0), Some("BQR:   "));
        assert_eq!(backend.text_at(4, 9), Some("b2"));
        assert_eq!(renderer.flicker_row(), Some(6));
    }

    #[test]
    fn test_flicker_repaint() {
        let mut renderer = Renderer::new(RenderOptions::default());
        let mut backend = MockBackend::new(80, 60);
        renderer
            .draw_static::<_, Solid>(&mut backend, &HHDUC, &BQR, None)
            .unwrap();

        let frame = FlickerFrame {
            clock: false,
            nibble: 0b1000,
        };
        renderer.draw_flicker(&mut backend, frame).unwrap();

        let top = renderer.flicker_row().unwrap();
        // border
        assert_eq!(backend.pixels.get(&(top, 5)), Some(&true));
        // clock field is black
        assert_eq!(backend.pixels.get(&(top + 1, 1)), Some(&false));
        // bit 3 is white
        assert_eq!(backend.pixels.get(&(top + 3, 14)), Some(&true));
        assert_eq!(backend.pixels.len(), usize::from(FLICKER_WIDTH * FLICKER_HEIGHT));
    }
}
