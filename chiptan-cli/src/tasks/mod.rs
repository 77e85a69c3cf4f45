//! Async tasks
//!
//! The flicker loop and the keyboard watcher that cancels it.

mod flicker;

pub use flicker::run_flicker;
