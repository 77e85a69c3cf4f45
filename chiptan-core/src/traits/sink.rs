//! Frame sink trait for flicker output

use chiptan_protocol::FlickerFrame;

/// Receives one flicker frame per tick
///
/// Implementations draw the frame and make it visible. Pacing is the
/// caller's job; `show` should return promptly.
pub trait FrameSink {
    type Error;

    /// Display `frame`, replacing the previous one
    fn show(&mut self, frame: FlickerFrame) -> Result<(), Self::Error>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    type Error = S::Error;

    fn show(&mut self, frame: FlickerFrame) -> Result<(), Self::Error> {
        (**self).show(frame)
    }
}
