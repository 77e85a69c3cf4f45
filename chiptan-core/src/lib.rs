//! Board-agnostic core logic for chipTAN output
//!
//! This crate contains everything between the payload encoders and a
//! concrete display:
//!
//! - Session preparation (fields → HHDuc → BQR)
//! - Transmission configuration types
//! - The `FrameSink` trait that renderers implement
//! - The cancellable, timer-driven flicker transmission loop

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod session;
pub mod traits;
pub mod transmit;

pub use config::{ConfigError, FlickerConfig};
pub use session::Session;
pub use traits::FrameSink;
pub use transmit::{transmit, TransmitStats};
