//! Renderer abstraction traits
//!
//! These traits define the interface between the transmission logic
//! and whatever draws the frames.

pub mod sink;

pub use sink::FrameSink;
