//! Crossterm display backend
//!
//! Text goes to character cells; a pixel is two cells with a white or
//! black background so that it comes out roughly square. Anything past the
//! edge of the window is clipped.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, warn};

use chiptan_display::{DisplayBackend, DisplayError, Tint};

use crate::logging::StderrMute;

const PIXEL: &str = "  ";

/// Display backend writing crossterm commands to `W`
pub struct TerminalBackend<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Raw mode and alternate screen are ours to undo
    owns_terminal: bool,
    /// Held while the tty shows the screen
    _stderr_mute: Option<StderrMute>,
}

impl<W: Write> TerminalBackend<W> {
    /// Backend over an arbitrary writer; does not touch terminal modes
    #[cfg(test)]
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            owns_terminal: false,
            _stderr_mute: None,
        }
    }
}

impl TerminalBackend<Stdout> {
    /// Take over the controlling terminal
    ///
    /// Enables raw mode, switches to the alternate screen and hides the
    /// cursor. Stderr logging is muted until drop, when everything is
    /// restored.
    pub fn stdout() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut out = io::stdout();
        debug!("Terminal is {}x{} cells", cols, rows);

        let mute = StderrMute::new();
        enable_raw_mode()?;
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        Ok(Self {
            out,
            cols,
            rows,
            owns_terminal: true,
            _stderr_mute: Some(mute),
        })
    }
}

fn tint_color(tint: Tint) -> Option<Color> {
    match tint {
        Tint::Plain => None,
        Tint::Magic => Some(Color::Red),
        Tint::Ams => Some(Color::Green),
        Tint::Data => Some(Color::Yellow),
        Tint::Checksum => Some(Color::Blue),
    }
}

fn comm(e: io::Error) -> DisplayError {
    warn!("Terminal write failed: {}", e);
    DisplayError::Communication
}

impl<W: Write> DisplayBackend for TerminalBackend<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        queue!(self.out, ResetColor, Clear(ClearType::All)).map_err(comm)
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str, tint: Tint) -> Result<(), DisplayError> {
        if row >= self.rows || col >= self.cols {
            return Ok(());
        }
        let visible = usize::from(self.cols - col);
        let text = match text.char_indices().nth(visible) {
            Some((end, _)) => &text[..end],
            None => text,
        };
        queue!(self.out, MoveTo(col, row)).map_err(comm)?;
        match tint_color(tint) {
            Some(color) => {
                queue!(self.out, SetForegroundColor(color), Print(text), ResetColor).map_err(comm)
            }
            None => queue!(self.out, Print(text)).map_err(comm),
        }
    }

    fn draw_pixel(&mut self, row: u16, x: u16, white: bool) -> Result<(), DisplayError> {
        let col = x.saturating_mul(2);
        if row >= self.rows || col.saturating_add(1) >= self.cols {
            return Ok(());
        }
        let color = if white { Color::White } else { Color::Black };
        queue!(
            self.out,
            MoveTo(col, row),
            SetBackgroundColor(color),
            Print(PIXEL),
            ResetColor
        )
        .map_err(comm)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.out.flush().map_err(comm)
    }

    fn dimensions(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }
}

#[cfg(test)]
impl TerminalBackend<Vec<u8>> {
    /// Bytes written so far
    pub fn output(&self) -> &[u8] {
        &self.out
    }
}

impl<W: Write> Drop for TerminalBackend<W> {
    fn drop(&mut self) {
        if !self.owns_terminal {
            return;
        }
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
