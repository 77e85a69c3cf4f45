//! Display abstraction and shared screen layout for chipTAN output
//!
//! This crate provides:
//! - `DisplayBackend` trait for character-cell displays (terminals, OLEDs)
//! - `QrMatrix` trait for whatever QR encoder produced the BQR matrix
//! - Flicker field, hex segment and QR geometry
//! - `Renderer`, which composes the full screen on any backend
//!
//! # Screen Layout
//!
//! ```text
//! HHDuc: 1dc80138...          <- raw HHDuc in hex
//! BQR:   444b0a56...          <- magic / AMS / data / checksum segments
//!
//! ██████████████████          <- flicker field: clock + 4 data bits
//! ██  ▓▓▓  ▓▓▓  ▓▓▓  ▓▓▓  ██
//! ██████████████████
//!
//! (QR code with quiet zone)
//!
//! Press any key to exit.
//! ```
//!
//! A flicker field pixel and a QR module are both one square "pixel", drawn
//! two character cells wide.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod layout;
pub mod renderer;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, Tint};
pub use layout::{bqr_segments, flicker_pixel, qr_fits, qr_pixel, QrMatrix, Segment};
pub use renderer::{RenderOptions, Renderer};
