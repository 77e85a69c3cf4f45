//! Screen geometry shared by every backend

use core::ops::Range;

use chiptan_protocol::FlickerFrame;

use crate::backend::Tint;

/// Optical fields: clock plus four data bits
pub const FIELD_COUNT: u16 = 5;

/// Width of one field in pixels
pub const FIELD_WIDTH: u16 = 3;

/// Height of the field bar in pixels
pub const FIELD_HEIGHT: u16 = 5;

/// White frame around the field bar
pub const BORDER: u16 = 1;

/// Flicker field width in pixels, border included
pub const FLICKER_WIDTH: u16 = FIELD_COUNT * FIELD_WIDTH + 2 * BORDER;

/// Flicker field height in pixels, border included
pub const FLICKER_HEIGHT: u16 = FIELD_HEIGHT + 2 * BORDER;

/// White margin around a QR matrix, in modules
pub const QR_QUIET_ZONE: usize = 4;

/// Whether pixel (`x`, `y`) of the flicker field is white
pub fn flicker_pixel(frame: &FlickerFrame, x: u16, y: u16) -> bool {
    let inside = (BORDER..FLICKER_WIDTH - BORDER).contains(&x)
        && (BORDER..FLICKER_HEIGHT - BORDER).contains(&y);
    if !inside {
        return true;
    }
    frame.fields()[usize::from((x - BORDER) / FIELD_WIDTH)]
}

/// A coloured byte range of a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub tint: Tint,
    pub range: Range<usize>,
}

impl Segment {
    const fn new(tint: Tint, start: usize, end: usize) -> Self {
        Self {
            tint,
            range: start..end,
        }
    }
}

/// Split a BQR payload of `len` bytes into magic, AMS flag, data and checksum
///
/// Ranges are clamped so a short buffer never yields out-of-bounds ranges.
pub fn bqr_segments(len: usize) -> [Segment; 4] {
    let ams = 2.min(len);
    let data = 3.min(len);
    let checksum = len.saturating_sub(2).max(data);
    [
        Segment::new(Tint::Magic, 0, ams),
        Segment::new(Tint::Ams, ams, data),
        Segment::new(Tint::Data, data, checksum),
        Segment::new(Tint::Checksum, checksum, len),
    ]
}

/// Number of text rows a hex dump of `len` bytes occupies after a label
pub fn hex_rows(len: usize, cols: u16, label_len: u16) -> u16 {
    let per_row = hex_bytes_per_row(cols, label_len);
    len.div_ceil(per_row).max(1) as u16
}

/// Bytes that fit on one text row after a label (at least one)
pub fn hex_bytes_per_row(cols: u16, label_len: u16) -> usize {
    usize::from(cols.saturating_sub(label_len) / 2).max(1)
}

/// Square black/white matrix produced by an external QR encoder
pub trait QrMatrix {
    /// Modules per side
    fn width(&self) -> usize;

    /// Whether module (`x`, `y`) is dark
    fn is_dark(&self, x: usize, y: usize) -> bool;
}

/// Side length of a matrix including its quiet zone
pub fn qr_side(width: usize) -> usize {
    width + 2 * QR_QUIET_ZONE
}

/// Whether pixel (`x`, `y`) of the padded matrix is white
pub fn qr_pixel<Q: QrMatrix + ?Sized>(qr: &Q, x: usize, y: usize) -> bool {
    let width = qr.width();
    let inside = (QR_QUIET_ZONE..QR_QUIET_ZONE + width).contains(&x)
        && (QR_QUIET_ZONE..QR_QUIET_ZONE + width).contains(&y);
    !inside || !qr.is_dark(x - QR_QUIET_ZONE, y - QR_QUIET_ZONE)
}

/// Whether a padded matrix fits into `cols` x `rows` character cells
pub fn qr_fits(width: usize, cols: u16, rows: u16) -> bool {
    let side = qr_side(width);
    side < usize::from(cols / 2) && side <= usize::from(rows)
}
