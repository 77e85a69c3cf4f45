//! Display backend trait
//!
//! Defines the interface for character-cell displays.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Communication => write!(f, "display communication failed"),
            DisplayError::NotInitialized => write!(f, "display not initialized"),
        }
    }
}

impl core::error::Error for DisplayError {}

/// Colour role of a piece of text
///
/// Backends without colour support may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tint {
    #[default]
    Plain,
    /// BQR magic bytes
    Magic,
    /// BQR AMS flag
    Ams,
    /// HHDuc content
    Data,
    /// BQR CRC trailer
    Checksum,
}

/// Display backend trait
///
/// Coordinates are in character cells, except for `draw_pixel` where `x`
/// counts square pixels of two cells each.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    fn draw_text(&mut self, row: u16, col: u16, text: &str, tint: Tint)
        -> Result<(), DisplayError>;

    /// Draw one square pixel, white or black
    fn draw_pixel(&mut self, row: u16, x: u16, white: bool) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u16, u16);

    /// Adopt new dimensions after the display area changed
    ///
    /// Fixed-size panels keep the default, which ignores the call.
    fn resize(&mut self, _cols: u16, _rows: u16) {}
}
