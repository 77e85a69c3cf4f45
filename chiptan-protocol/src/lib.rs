//! chipTAN payload encoding
//!
//! This crate builds the two binary formats understood by chipTAN hardware
//! TAN generators and serializes the raw payload into an optical flicker
//! signal.
//!
//! # Payload Overview
//!
//! The HHDuc payload carries the transaction data:
//! ```text
//! ┌────┬────┬─────────┬───────────┬─────┬─────┬─────┬─────┬─────┬─────┬──────────┐
//! │ LC │ LS │ CONTROL │ STARTCODE │ LDE1│ DE1 │ LDE2│ DE2 │ LDE3│ DE3 │ CHECKSUM │
//! │ 1B │ 1B │ 1B      │ 1–63B     │ 1B  │ ≤127│ 1B  │ ≤127│ 1B  │ ≤127│ 1B       │
//! └────┴────┴─────────┴───────────┴─────┴─────┴─────┴─────┴─────┴─────┴──────────┘
//! ```
//! Absent data elements contribute no bytes. The checksum byte packs a
//! Luhn digit (high nibble) and a nibble XOR (low nibble).
//!
//! The BQR payload wraps an HHDuc for QR transport:
//! ```text
//! ┌───────┬─────┬───────┬────────┐
//! │ "DK"  │ 'N' │ HHDuc │ CRC-16 │
//! │ 2B    │ 1B  │ ≤256B │ 2B BE  │
//! └───────┴─────┴───────┴────────┘
//! ```
//! Everything after the magic is XOR-masked with the repeating pattern "DK".
//!
//! The flicker code transmits the start sequence `0x0F 0xFF` followed by the
//! HHDuc, one nibble per clock cycle, low nibble first, forever.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bqr;
pub mod checksum;
pub mod error;
pub mod flicker;
pub mod hhduc;

pub use bqr::{apply_mask, decode_bqr, encode_bqr, BqrPayload, AMS_FLAG, BQR_MAGIC, MAX_BQR_SIZE};
pub use checksum::{crc16_arc, digit_sum, nibble_xor};
pub use error::{BqrError, EncodeError, ErrorKind};
pub use flicker::{FlickerCode, FlickerFrame, FRAMES_PER_BYTE, START_SEQUENCE};
pub use hhduc::{
    encode_hhduc, hhduc_size, HhducPayload, TransactionFields, MAX_DATA_ELEMENT_LEN, MAX_HHDUC_SIZE,
    MAX_STARTCODE_LEN,
};
